// Tool execution errors

use school_api_client::SchoolApiError;

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Arguments did not match the tool's parameter schema.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Upstream call failed.
    #[error(transparent)]
    Client(#[from] SchoolApiError),
}

impl ToolError {
    pub fn invalid_arguments(tool: &'static str, source: serde_json::Error) -> Self {
        Self::InvalidArguments { tool, source }
    }
}
