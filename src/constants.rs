// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Root of every Notion REST endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Largest `page_size` the Notion API accepts on paginated endpoints.
pub const NOTION_API_MAX_PAGE_SIZE: u8 = 100;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// MCP protocol
// ---------------------------------------------------------------------------

/// Protocol revision announced during `initialize`.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Name announced in `serverInfo`.
pub const SERVER_NAME: &str = "notion-mcp";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Returned in place of rendered text when conversion fails unexpectedly.
pub const RENDER_FAILURE_MESSAGE: &str = "Error: this response could not be converted to Markdown. \
Request the same data again with the format argument set to \"json\" to see the raw response.";

/// Marker for property values whose type is not recognized.
pub const UNSUPPORTED_PROPERTY_MARKER: &str = "(Unsupported property type)";

/// Fallback title for pages and databases with an empty title.
pub const UNTITLED: &str = "Untitled";

/// Estimated characters per rendered list item, used to pre-allocate output.
pub const CHARS_PER_ITEM_ESTIMATE: usize = 256;
