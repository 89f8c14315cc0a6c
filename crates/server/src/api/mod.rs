use crate::config::{AppState, ServerConfig};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use school_mcp::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Start the MCP HTTP server and block until shutdown
pub async fn serve(host: &str, port: u16, config: ServerConfig) -> Result<()> {
    let state = AppState::new(&config)?;

    let app = create_router(state);

    let listener = bind(host, port).await?;
    tracing::info!("MCP endpoint listening on http://{}/mcp", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Bind `host` and `port` as separate parts so IPv6 hosts such as `::`
/// need no brackets.
async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}", display_addr(host, port)))
}

/// `host:port`, with IPv6 literals bracketed.
pub fn display_addr(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the API router. `/mcp` only accepts POST: the transport is
/// stateless, so there is no server-initiated stream and no session to end.
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mcp", post(handle_mcp))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let info = state.mcp.info();
    Json(serde_json::json!({
        "status": "ok",
        "service": info.name,
        "version": info.version,
    }))
}

/// Handle one JSON-RPC message posted to the MCP endpoint
async fn handle_mcp(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Rejecting unparsable MCP message: {}", e);
            return rpc_error(StatusCode::BAD_REQUEST, Value::Null, JsonRpcError::parse_error());
        }
    };

    // Responses from the client to server requests; we never send any.
    if message.get("method").is_none()
        && (message.get("result").is_some() || message.get("error").is_some())
    {
        return StatusCode::ACCEPTED.into_response();
    }

    let id = message.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(_) => {
            return rpc_error(StatusCode::BAD_REQUEST, id, JsonRpcError::invalid_request());
        }
    };

    match state.mcp.handle_request(request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn rpc_error(status: StatusCode, id: Value, error: JsonRpcError) -> Response {
    (status, Json(JsonRpcResponse::error(id, error))).into_response()
}
