use anyhow::{Context, Result};
use school_api_client::{SchoolApiClient, DEFAULT_BASE_URL};
use school_mcp::{default_registry, McpServer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for upstream calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("school-mcp/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Apply command line / environment overrides on top of the file.
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            self.upstream.base_url = base_url;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.upstream.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }

    /// Build the upstream client described by this configuration.
    pub fn build_client(&self) -> Result<SchoolApiClient> {
        SchoolApiClient::builder()
            .base_url(&self.upstream.base_url)
            .timeout(self.upstream_timeout())
            .user_agent(&self.upstream.user_agent)
            .build()
            .context("Failed to create upstream client")
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = config.build_client()?;
        let registry = default_registry(client);
        tracing::info!("Registered {} tools", registry.len());

        Ok(Self {
            mcp: Arc::new(McpServer::new(registry)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig::load(&temp_dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("school-mcp.toml");
        std::fs::write(&path, "[upstream]\ntimeout_secs = 5\n").unwrap();

        let config = ServerConfig::load(&path).unwrap();

        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert!(config.upstream.user_agent.starts_with("school-mcp/"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("school-mcp.toml");
        std::fs::write(&path, "[upstream\n").unwrap();

        assert!(ServerConfig::load(&path).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = ServerConfig::default()
            .with_overrides(Some("http://localhost:9999".to_string()), Some(3));

        assert_eq!(config.upstream.base_url, "http://localhost:9999");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(3));

        let unchanged = ServerConfig::default().with_overrides(None, None);
        assert_eq!(unchanged.upstream.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_bad_base_url_fails_client_build() {
        let config = ServerConfig::default().with_overrides(Some("not a url".to_string()), None);

        assert!(config.build_client().is_err());
    }

    #[test]
    fn test_app_state_registers_all_tools() {
        let state = AppState::new(&ServerConfig::default()).unwrap();

        assert_eq!(state.mcp.registry().len(), 6);
    }
}
