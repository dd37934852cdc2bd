// src/tools/catalog.rs
//! The tool vocabulary and the catalog advertised through `tools/list`.

use crate::error::AppError;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Every tool this server knows, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    RetrievePage,
    CreatePage,
    UpdatePage,
    ArchivePage,
    RestorePage,
    RetrieveBlock,
    RetrieveBlockChildren,
    AppendBlockChildren,
    UpdateBlock,
    DeleteBlock,
    RetrieveDatabase,
    QueryDatabase,
    CreateDatabase,
    UpdateDatabase,
    RetrieveComments,
    CreateComment,
    Search,
    ListUsers,
    RetrieveUser,
    RetrieveBotUser,
}

impl ToolName {
    pub const ALL: [ToolName; 20] = [
        ToolName::RetrievePage,
        ToolName::CreatePage,
        ToolName::UpdatePage,
        ToolName::ArchivePage,
        ToolName::RestorePage,
        ToolName::RetrieveBlock,
        ToolName::RetrieveBlockChildren,
        ToolName::AppendBlockChildren,
        ToolName::UpdateBlock,
        ToolName::DeleteBlock,
        ToolName::RetrieveDatabase,
        ToolName::QueryDatabase,
        ToolName::CreateDatabase,
        ToolName::UpdateDatabase,
        ToolName::RetrieveComments,
        ToolName::CreateComment,
        ToolName::Search,
        ToolName::ListUsers,
        ToolName::RetrieveUser,
        ToolName::RetrieveBotUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::RetrievePage => "retrieve_page",
            ToolName::CreatePage => "create_page",
            ToolName::UpdatePage => "update_page",
            ToolName::ArchivePage => "archive_page",
            ToolName::RestorePage => "restore_page",
            ToolName::RetrieveBlock => "retrieve_block",
            ToolName::RetrieveBlockChildren => "retrieve_block_children",
            ToolName::AppendBlockChildren => "append_block_children",
            ToolName::UpdateBlock => "update_block",
            ToolName::DeleteBlock => "delete_block",
            ToolName::RetrieveDatabase => "retrieve_database",
            ToolName::QueryDatabase => "query_database",
            ToolName::CreateDatabase => "create_database",
            ToolName::UpdateDatabase => "update_database",
            ToolName::RetrieveComments => "retrieve_comments",
            ToolName::CreateComment => "create_comment",
            ToolName::Search => "search",
            ToolName::ListUsers => "list_users",
            ToolName::RetrieveUser => "retrieve_user",
            ToolName::RetrieveBotUser => "retrieve_bot_user",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ToolName::RetrievePage => "Retrieve a page's properties. Page content lives in its child blocks.",
            ToolName::CreatePage => "Create a page under a page or database parent, optionally with content.",
            ToolName::UpdatePage => "Update a page's properties, icon, cover or archived state.",
            ToolName::ArchivePage => "Move a page to the trash.",
            ToolName::RestorePage => "Restore an archived page.",
            ToolName::RetrieveBlock => "Retrieve a single block.",
            ToolName::RetrieveBlockChildren => "List the child blocks of a page or block, one level deep.",
            ToolName::AppendBlockChildren => "Append blocks to a page or block, given as block objects or Markdown.",
            ToolName::UpdateBlock => "Update a block's type-specific content.",
            ToolName::DeleteBlock => "Delete (archive) a block.",
            ToolName::RetrieveDatabase => "Retrieve a database's title, description and property schema.",
            ToolName::QueryDatabase => "Query a database's pages with optional filter and sorts.",
            ToolName::CreateDatabase => "Create a database inside a page.",
            ToolName::UpdateDatabase => "Update a database's title, description or property schema.",
            ToolName::RetrieveComments => "List the open comments on a page or block.",
            ToolName::CreateComment => "Add a comment to a page or reply in an existing discussion.",
            ToolName::Search => "Search pages and databases shared with the integration by title.",
            ToolName::ListUsers => "List the users in the workspace.",
            ToolName::RetrieveUser => "Retrieve a user by ID.",
            ToolName::RetrieveBotUser => "Retrieve the bot user behind the current API key.",
        }
    }

    /// Properties and required keys of the tool's input schema, excluding
    /// the shared `format` argument.
    fn input_properties(&self) -> (Value, Vec<&'static str>) {
        match self {
            ToolName::RetrievePage | ToolName::ArchivePage | ToolName::RestorePage => {
                (json!({"page_id": id_schema("Page ID or URL")}), vec!["page_id"])
            }
            ToolName::CreatePage => (
                json!({
                    "parent": object_schema("Parent, e.g. {\"page_id\": \"...\"} or {\"database_id\": \"...\"}"),
                    "properties": object_schema("Property values keyed by property name"),
                    "children": array_schema("Block objects to add as page content"),
                    "markdown": string_schema("Page content as Markdown, used when children is absent"),
                    "icon": object_schema("Page icon"),
                    "cover": object_schema("Page cover")
                }),
                vec!["parent", "properties"],
            ),
            ToolName::UpdatePage => (
                json!({
                    "page_id": id_schema("Page ID or URL"),
                    "properties": object_schema("Property values to change"),
                    "icon": object_schema("New icon"),
                    "cover": object_schema("New cover"),
                    "archived": {"type": "boolean", "description": "Archive or restore the page"}
                }),
                vec!["page_id"],
            ),
            ToolName::RetrieveBlock | ToolName::DeleteBlock => {
                (json!({"block_id": id_schema("Block ID")}), vec!["block_id"])
            }
            ToolName::RetrieveBlockChildren => (
                json!({
                    "block_id": id_schema("Page or block ID"),
                    "page_size": page_size_schema(),
                    "start_cursor": cursor_schema()
                }),
                vec!["block_id"],
            ),
            ToolName::AppendBlockChildren => (
                json!({
                    "block_id": id_schema("Page or block ID to append to"),
                    "children": array_schema("Block objects to append"),
                    "markdown": string_schema("Content as Markdown, used when children is absent"),
                    "after": id_schema("Insert after this child block instead of at the end")
                }),
                vec!["block_id"],
            ),
            ToolName::UpdateBlock => (
                json!({
                    "block_id": id_schema("Block ID"),
                    "block": object_schema("Type-specific update, e.g. {\"paragraph\": {\"rich_text\": [...]}}")
                }),
                vec!["block_id", "block"],
            ),
            ToolName::RetrieveDatabase => (
                json!({"database_id": id_schema("Database ID or URL")}),
                vec!["database_id"],
            ),
            ToolName::QueryDatabase => (
                json!({
                    "database_id": id_schema("Database ID or URL"),
                    "filter": object_schema("Notion filter object"),
                    "sorts": array_schema("Notion sort objects"),
                    "page_size": page_size_schema(),
                    "start_cursor": cursor_schema()
                }),
                vec!["database_id"],
            ),
            ToolName::CreateDatabase => (
                json!({
                    "parent": object_schema("Parent page, e.g. {\"page_id\": \"...\"}"),
                    "title": array_schema("Title as rich text"),
                    "properties": object_schema("Property schema keyed by property name")
                }),
                vec!["parent", "properties"],
            ),
            ToolName::UpdateDatabase => (
                json!({
                    "database_id": id_schema("Database ID or URL"),
                    "title": array_schema("New title as rich text"),
                    "description": array_schema("New description as rich text"),
                    "properties": object_schema("Property schema changes")
                }),
                vec!["database_id"],
            ),
            ToolName::RetrieveComments => (
                json!({
                    "block_id": id_schema("Page or block ID"),
                    "page_size": page_size_schema(),
                    "start_cursor": cursor_schema()
                }),
                vec!["block_id"],
            ),
            ToolName::CreateComment => (
                json!({
                    "page_id": id_schema("Page to comment on"),
                    "discussion_id": string_schema("Discussion to reply in"),
                    "text": string_schema("Comment text"),
                    "rich_text": array_schema("Comment as rich text, used when text is absent")
                }),
                vec![],
            ),
            ToolName::Search => (
                json!({
                    "query": string_schema("Text to match against titles"),
                    "filter": object_schema("e.g. {\"property\": \"object\", \"value\": \"page\"}"),
                    "sort": object_schema("e.g. {\"direction\": \"descending\", \"timestamp\": \"last_edited_time\"}"),
                    "page_size": page_size_schema(),
                    "start_cursor": cursor_schema()
                }),
                vec![],
            ),
            ToolName::ListUsers => (
                json!({"page_size": page_size_schema(), "start_cursor": cursor_schema()}),
                vec![],
            ),
            ToolName::RetrieveUser => (json!({"user_id": id_schema("User ID")}), vec!["user_id"]),
            ToolName::RetrieveBotUser => (json!({}), vec![]),
        }
    }

    /// The JSON Schema object published as `inputSchema`.
    pub fn input_schema(&self) -> Value {
        let (properties, required) = self.input_properties();
        let mut properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        properties.insert(
            "format".to_string(),
            json!({
                "type": "string",
                "enum": ["markdown", "json"],
                "description": "Response format; Markdown unless configured otherwise"
            }),
        );
        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s.trim())
            .ok_or_else(|| AppError::UnknownTool(s.to_string()))
    }
}

fn id_schema(description: &str) -> Value {
    json!({"type": "string", "minLength": 32, "description": description})
}

fn string_schema(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn object_schema(description: &str) -> Value {
    json!({"type": "object", "description": description})
}

fn array_schema(description: &str) -> Value {
    json!({"type": "array", "items": {"type": "object"}, "description": description})
}

fn page_size_schema() -> Value {
    json!({"type": "integer", "minimum": 1, "maximum": 100, "description": "Results per page"})
}

fn cursor_schema() -> Value {
    json!({"type": "string", "description": "next_cursor from a previous response"})
}

/// A tool as advertised to clients.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name.as_str(),
            "description": self.description,
            "inputSchema": self.input_schema
        })
    }
}

/// The enabled subset of tools, kept in catalog order.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: IndexMap<&'static str, ToolDefinition>,
}

impl ToolCatalog {
    /// A catalog exposing exactly the given tools.
    pub fn with_enabled(enabled: &[ToolName]) -> Self {
        let tools = ToolName::ALL
            .iter()
            .filter(|tool| enabled.contains(tool))
            .map(|tool| {
                (
                    tool.as_str(),
                    ToolDefinition {
                        name: *tool,
                        description: tool.description(),
                        input_schema: tool.input_schema(),
                    },
                )
            })
            .collect();
        Self { tools }
    }

    /// A catalog exposing every tool.
    pub fn full() -> Self {
        Self::with_enabled(&ToolName::ALL)
    }

    /// Looks up an enabled tool by wire name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The `tools/list` result body.
    pub fn list_json(&self) -> Value {
        let tools: Vec<Value> = self.tools.values().map(ToolDefinition::to_json).collect();
        json!({ "tools": tools })
    }
}
