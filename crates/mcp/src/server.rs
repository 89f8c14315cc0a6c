// MCP request dispatcher
//
// Transport-agnostic: takes one JSON-RPC request, returns the response (or
// nothing for notifications). Holds no per-client state, so any request can
// be served by any instance.

use crate::error::ToolError;
use crate::protocol::{
    negotiate_protocol_version, CallToolParams, CallToolResult, InitializeParams,
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    ServerCapabilities, ServerInfo, ToolsCapability, LATEST_PROTOCOL_VERSION,
};
use crate::tools::info::{SERVER_NAME, SERVER_VERSION};
use crate::tools::ToolRegistry;
use serde::Serialize;
use serde_json::Value;

pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let protocol_version = match params {
            Some(params) => {
                let params: InitializeParams = serde_json::from_value(params)
                    .map_err(|e| JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)))?;
                if let Some(client) = &params.client_info {
                    tracing::info!(client = %client.name, version = %client.version, "Client initializing");
                }
                negotiate_protocol_version(&params.protocol_version)
            }
            None => LATEST_PROTOCOL_VERSION,
        };

        to_result(&InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tools/call params"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)))
            })?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Default::default()));

        tracing::debug!(tool = %params.name, "Calling tool");
        let result = match tool.execute(arguments).await {
            Ok(result) => result,
            Err(err @ ToolError::InvalidArguments { .. }) => {
                return Err(JsonRpcError::invalid_params(err.to_string()));
            }
            Err(ToolError::Client(err)) => {
                tracing::warn!(tool = %params.name, error = %err, "Tool call failed");
                CallToolResult::error(err.to_string())
            }
        };

        to_result(&result)
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
