// MCP (Model Context Protocol) server for the school API
// Exposes school search, classes, timetables, lunch menus and events as tools.

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{ToolError, ToolResult};
pub use server::McpServer;
pub use tools::{default_registry, Tool, ToolRegistry};
