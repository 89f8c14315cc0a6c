// Local server metadata tool

use crate::error::ToolResult;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use serde::{Deserialize, Serialize};

/// Name reported to MCP clients and by `get_server_info`.
pub const SERVER_NAME: &str = "School API Server";

/// Server version, taken from the crate version.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

const DEFAULT_ENVIRONMENT: &str = "development";

/// Toolchain the binary was built with.
const RUNTIME_VERSION: &str = env!("SCHOOL_MCP_RUSTC_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfoReport {
    pub server_name: String,
    pub version: String,
    pub environment: String,
    pub runtime_version: String,
}

impl ServerInfoReport {
    /// Snapshot the current process configuration.
    pub fn current() -> Self {
        Self {
            server_name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            environment: std::env::var(ENVIRONMENT_VAR)
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            runtime_version: RUNTIME_VERSION.to_string(),
        }
    }
}

/// Tool reporting server name, version, environment and runtime version.
/// Performs no I/O.
pub struct ServerInfoTool;

impl ServerInfoTool {
    pub const NAME: &'static str = "get_server_info";

    pub fn new() -> Self {
        Self
    }
}

impl Default for ServerInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for ServerInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get information about the MCP server including name, version, \
                          environment, and runtime version."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> ToolResult<CallToolResult> {
        let report = ServerInfoReport::current();
        Ok(CallToolResult::json(serde_json::json!({
            "server_name": report.server_name,
            "version": report.version,
            "environment": report.environment,
            "runtime_version": report.runtime_version,
        })))
    }
}
