// src/lib.rs
//! notion-mcp library: exposes the Notion API as MCP tools and renders its
//! responses as Markdown.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ServerConfig`
//! - **Domain types**: `NotionId`, `ApiKey`, `PageSize`, `ResponseFormat`
//! - **Rendering**: `convert_to_markdown` and the per-fragment renderers
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `ApiRequest`
//! - **Tools and server**: `ToolCatalog`, `ToolName`, `McpServer`

pub mod api;
mod config;
mod constants;
mod error;
pub mod formatting;
pub mod model;
pub mod server;
pub mod tools;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{parse_tool_list, CommandLineInput, ServerConfig};

// --- Constants ---
pub use crate::constants::{RENDER_FAILURE_MESSAGE, UNSUPPORTED_PROPERTY_MARKER};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, PageSize, ResponseFormat};

// --- Rendering ---
pub use crate::formatting::{
    convert_to_markdown, describe_schema, markdown_to_blocks, plain_text, render_block,
    render_property_value, render_rich_text,
};

// --- API Client ---
pub use crate::api::{ApiRequest, HttpMethod, NotionHttpClient, NotionRepository};

// --- Tools and Server ---
pub use crate::server::{run_stdio, serve, McpServer};
pub use crate::tools::{call_tool, ToolCatalog, ToolName, ToolOutput};
