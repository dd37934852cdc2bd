// src/server/mod.rs
//! MCP server: JSON-RPC 2.0 request handling over the tool catalog.

mod stdio;

pub use stdio::{run_stdio, serve};

use crate::api::NotionRepository;
use crate::constants::{MCP_PROTOCOL_VERSION, SERVER_NAME};
use crate::tools::{call_tool, ToolCatalog};
use crate::types::ResponseFormat;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::sync::Arc;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    pub method: String,
    /// `None` only when the member is absent; `"id": null` is `Some(Null)`.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

/// Handles MCP messages against one Notion repository.
pub struct McpServer {
    repository: Arc<dyn NotionRepository>,
    catalog: ToolCatalog,
    default_format: ResponseFormat,
}

impl McpServer {
    pub fn new(
        repository: Arc<dyn NotionRepository>,
        catalog: ToolCatalog,
        default_format: ResponseFormat,
    ) -> Self {
        Self {
            repository,
            catalog,
            default_format,
        }
    }

    /// Handles one raw message; `None` means nothing is written back.
    pub async fn handle_line(&self, raw: &str) -> Option<Value> {
        let data: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Unparseable message: {}", e);
                return Some(json_rpc_error(None, PARSE_ERROR, &format!("Parse error: {e}")));
            }
        };

        let (id, has_method) = match data.as_object() {
            Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
            None => return Some(json_rpc_error(None, INVALID_REQUEST, "Invalid Request")),
        };
        if !has_method {
            return Some(json_rpc_error(id, INVALID_REQUEST, "Invalid Request"));
        }

        let request: JsonRpcRequest = match serde_json::from_value(data) {
            Ok(request) => request,
            Err(e) => {
                return Some(json_rpc_error(
                    id,
                    INVALID_REQUEST,
                    &format!("Invalid Request: {e}"),
                ))
            }
        };

        self.handle(request).await
    }

    /// Dispatches a parsed request. Notifications never produce a response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<Value> {
        if request.jsonrpc.as_deref().is_some_and(|version| version != "2.0") {
            return Some(json_rpc_error(
                request.id,
                INVALID_REQUEST,
                "Invalid Request: jsonrpc must be \"2.0\"",
            ));
        }

        let Some(id) = request.id else {
            log::debug!("Notification {}", request.method);
            return None;
        };

        log::debug!("Request {} ({})", request.method, id);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.catalog.list_json()),
            "tools/call" => self.call(request.params.as_ref()).await,
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {other}"))),
        };

        Some(match outcome {
            Ok(result) => json_rpc_response(Some(id), result),
            Err((code, message)) => json_rpc_error(Some(id), code, &message),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn call(&self, params: Option<&Value>) -> Result<Value, (i64, String)> {
        let name = params
            .and_then(|params| params.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| (INVALID_PARAMS, "Invalid params: missing tool name".to_string()))?;

        let definition = self
            .catalog
            .get(name)
            .ok_or_else(|| (INVALID_PARAMS, format!("Unknown tool: {name}")))?;

        let arguments = params.and_then(|params| params.get("arguments"));
        let output = call_tool(
            self.repository.as_ref(),
            definition.name,
            arguments,
            self.default_format,
        )
        .await;
        Ok(output.to_json())
    }
}
