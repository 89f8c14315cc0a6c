use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "school-mcp")]
#[command(about = "MCP server exposing the school information API as tools", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "school-mcp.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Upstream API base URL (overrides the configuration file)
    #[arg(long, env = "SCHOOL_API_BASE_URL")]
    upstream_url: Option<String>,

    /// Upstream request timeout in seconds (overrides the configuration file)
    #[arg(long, env = "SCHOOL_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_mcp=info,school_api_client=info,tower_http=info".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config =
        ServerConfig::load(&args.config)?.with_overrides(args.upstream_url, args.timeout_secs);
    tracing::info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "Upstream configured"
    );

    println!(
        "Starting School API MCP server on {}",
        api::display_addr(&args.host, args.port)
    );

    api::serve(&args.host, args.port, config).await?;

    Ok(())
}
