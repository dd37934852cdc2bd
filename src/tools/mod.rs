// src/tools/mod.rs
//! The MCP tool surface: catalog, argument validation, request mapping and
//! result formatting.

mod arguments;
mod catalog;
mod dispatch;
mod response;

pub use arguments::ToolArguments;
pub use catalog::{ToolCatalog, ToolDefinition, ToolName};
pub use dispatch::{build_request, call_tool};
pub use response::ToolOutput;
