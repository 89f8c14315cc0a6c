pub mod info;
pub mod school;
mod registry;

pub use info::ServerInfoTool;
pub use registry::{
    json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry,
};
pub use school::{
    GetClassesTool, GetLunchMenuTool, GetSchoolEventsTool, GetTimetableTool, SearchSchoolTool,
};

use school_api_client::SchoolApiClient;
use std::sync::Arc;

/// Build the registry of every tool this server exposes.
pub fn default_registry(client: SchoolApiClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(SearchSchoolTool::new(client.clone())));
    registry.register(Arc::new(GetClassesTool::new(client.clone())));
    registry.register(Arc::new(GetTimetableTool::new(client.clone())));
    registry.register(Arc::new(GetLunchMenuTool::new(client.clone())));
    registry.register(Arc::new(GetSchoolEventsTool::new(client)));

    registry.register(Arc::new(ServerInfoTool::new()));

    registry
}
