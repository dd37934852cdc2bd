// src/tools/dispatch.rs
//! Maps a validated tool call onto exactly one Notion API request.

use super::arguments::ToolArguments;
use super::catalog::ToolName;
use super::response::ToolOutput;
use crate::api::{ApiRequest, NotionRepository};
use crate::error::AppError;
use crate::formatting::markdown_to_blocks;
use crate::types::ResponseFormat;
use serde_json::{json, Map, Value};

/// Validates the arguments, sends the request and formats the outcome.
///
/// Never fails: every error becomes an `isError` tool result.
pub async fn call_tool(
    repository: &dyn NotionRepository,
    tool: ToolName,
    arguments: Option<&Value>,
    default_format: ResponseFormat,
) -> ToolOutput {
    let prepared = ToolArguments::new(tool, arguments).and_then(|args| {
        let format = args.format(default_format)?;
        let request = build_request(tool, &args)?;
        Ok((request, format))
    });

    let (request, format) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => {
            log::warn!("Rejected {} call: {}", tool, err);
            return ToolOutput::failure(&err);
        }
    };

    log::info!("Tool {} sends {}", tool, request);
    match repository.send(request).await {
        Ok(response) => ToolOutput::success(&response, format),
        Err(err) => {
            log::warn!("Tool {} failed: {}", tool, err);
            ToolOutput::failure(&err)
        }
    }
}

/// Builds the single API request a tool call stands for.
pub fn build_request(tool: ToolName, args: &ToolArguments) -> Result<ApiRequest, AppError> {
    let request = match tool {
        ToolName::RetrievePage => ApiRequest::get(format!("pages/{}", args.id("page_id")?)),
        ToolName::CreatePage => {
            let mut body = Map::new();
            body.insert("parent".into(), args.required_object("parent")?);
            body.insert("properties".into(), args.required_object("properties")?);
            if let Some(children) = block_content(args)? {
                body.insert("children".into(), children);
            }
            insert_optional(&mut body, "icon", args.optional_object("icon")?);
            insert_optional(&mut body, "cover", args.optional_object("cover")?);
            ApiRequest::post("pages", Value::Object(body))
        }
        ToolName::UpdatePage => {
            let endpoint = format!("pages/{}", args.id("page_id")?);
            let mut body = Map::new();
            insert_optional(&mut body, "properties", args.optional_object("properties")?);
            insert_optional(&mut body, "icon", args.optional_object("icon")?);
            insert_optional(&mut body, "cover", args.optional_object("cover")?);
            insert_optional(&mut body, "archived", args.optional_bool("archived")?.map(Value::Bool));
            require_changes(tool, &body, "properties, icon, cover or archived")?;
            ApiRequest::patch(endpoint, Value::Object(body))
        }
        ToolName::ArchivePage => ApiRequest::patch(
            format!("pages/{}", args.id("page_id")?),
            json!({"archived": true}),
        ),
        ToolName::RestorePage => ApiRequest::patch(
            format!("pages/{}", args.id("page_id")?),
            json!({"archived": false}),
        ),
        ToolName::RetrieveBlock => ApiRequest::get(format!("blocks/{}", args.id("block_id")?)),
        ToolName::RetrieveBlockChildren => paginate_query(
            ApiRequest::get(format!("blocks/{}/children", args.id("block_id")?)),
            args,
        )?,
        ToolName::AppendBlockChildren => {
            let endpoint = format!("blocks/{}/children", args.id("block_id")?);
            let children = block_content(args)?.ok_or_else(|| {
                AppError::invalid_arguments(
                    tool.as_str(),
                    "provide 'children' or non-empty 'markdown'",
                )
            })?;
            let mut body = Map::new();
            body.insert("children".into(), children);
            insert_optional(&mut body, "after", args.optional_id("after")?.map(Value::String));
            ApiRequest::patch(endpoint, Value::Object(body))
        }
        ToolName::UpdateBlock => ApiRequest::patch(
            format!("blocks/{}", args.id("block_id")?),
            args.required_object("block")?,
        ),
        ToolName::DeleteBlock => ApiRequest::delete(format!("blocks/{}", args.id("block_id")?)),
        ToolName::RetrieveDatabase => {
            ApiRequest::get(format!("databases/{}", args.id("database_id")?))
        }
        ToolName::QueryDatabase => {
            let endpoint = format!("databases/{}/query", args.id("database_id")?);
            let mut body = Map::new();
            insert_optional(&mut body, "filter", args.optional_object("filter")?);
            insert_optional(&mut body, "sorts", args.optional_array("sorts")?);
            paginate_body(&mut body, args)?;
            ApiRequest::post(endpoint, Value::Object(body))
        }
        ToolName::CreateDatabase => {
            let mut body = Map::new();
            body.insert("parent".into(), args.required_object("parent")?);
            insert_optional(&mut body, "title", args.optional_array("title")?);
            body.insert("properties".into(), args.required_object("properties")?);
            ApiRequest::post("databases", Value::Object(body))
        }
        ToolName::UpdateDatabase => {
            let endpoint = format!("databases/{}", args.id("database_id")?);
            let mut body = Map::new();
            insert_optional(&mut body, "title", args.optional_array("title")?);
            insert_optional(&mut body, "description", args.optional_array("description")?);
            insert_optional(&mut body, "properties", args.optional_object("properties")?);
            require_changes(tool, &body, "title, description or properties")?;
            ApiRequest::patch(endpoint, Value::Object(body))
        }
        ToolName::RetrieveComments => paginate_query(
            ApiRequest::get("comments").with_query("block_id", args.id("block_id")?),
            args,
        )?,
        ToolName::CreateComment => ApiRequest::post("comments", comment_body(tool, args)?),
        ToolName::Search => {
            let mut body = Map::new();
            insert_optional(&mut body, "query", args.optional_string("query")?.map(Value::String));
            insert_optional(&mut body, "filter", args.optional_object("filter")?);
            insert_optional(&mut body, "sort", args.optional_object("sort")?);
            paginate_body(&mut body, args)?;
            ApiRequest::post("search", Value::Object(body))
        }
        ToolName::ListUsers => paginate_query(ApiRequest::get("users"), args)?,
        ToolName::RetrieveUser => ApiRequest::get(format!("users/{}", args.id("user_id")?)),
        ToolName::RetrieveBotUser => ApiRequest::get("users/me"),
    };
    Ok(request)
}

fn insert_optional(body: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        body.insert(key.to_string(), value);
    }
}

fn require_changes(
    tool: ToolName,
    body: &Map<String, Value>,
    fields: &str,
) -> Result<(), AppError> {
    if body.is_empty() {
        return Err(AppError::invalid_arguments(
            tool.as_str(),
            format!("nothing to update; provide at least one of {}", fields),
        ));
    }
    Ok(())
}

/// `children` as given, else `markdown` converted to blocks.
fn block_content(args: &ToolArguments) -> Result<Option<Value>, AppError> {
    if let Some(children) = args.optional_array("children")? {
        return Ok(Some(children));
    }
    Ok(args
        .optional_string("markdown")?
        .map(|markdown| markdown_to_blocks(&markdown))
        .filter(|blocks| !blocks.is_empty())
        .map(Value::Array))
}

fn comment_body(tool: ToolName, args: &ToolArguments) -> Result<Value, AppError> {
    let rich_text = match args.optional_string("text")? {
        Some(text) => json!([{"type": "text", "text": {"content": text}}]),
        None => args.optional_array("rich_text")?.ok_or_else(|| {
            AppError::invalid_arguments(tool.as_str(), "provide 'text' or 'rich_text'")
        })?,
    };

    let mut body = Map::new();
    if let Some(discussion) = args.optional_string("discussion_id")? {
        body.insert("discussion_id".into(), Value::String(discussion));
    } else if let Some(page) = args.optional_id("page_id")? {
        body.insert("parent".into(), json!({"page_id": page}));
    } else {
        return Err(AppError::invalid_arguments(
            tool.as_str(),
            "provide 'page_id' or 'discussion_id'",
        ));
    }
    body.insert("rich_text".into(), rich_text);
    Ok(Value::Object(body))
}

fn paginate_query(request: ApiRequest, args: &ToolArguments) -> Result<ApiRequest, AppError> {
    let mut request = request;
    if let Some(size) = args.page_size()? {
        request = request.with_query("page_size", size.get().to_string());
    }
    if let Some(cursor) = args.start_cursor()? {
        request = request.with_query("start_cursor", cursor);
    }
    Ok(request)
}

fn paginate_body(body: &mut Map<String, Value>, args: &ToolArguments) -> Result<(), AppError> {
    insert_optional(body, "page_size", args.page_size()?.map(|size| json!(size.get())));
    insert_optional(body, "start_cursor", args.start_cursor()?.map(Value::String));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpMethod;
    use pretty_assertions::assert_eq;

    const RAW_ID: &str = "b55c9c91384d452b81dbd1ef79372b75";
    const HYPHENATED: &str = "b55c9c91-384d-452b-81db-d1ef79372b75";

    fn build(tool: ToolName, raw: Value) -> Result<ApiRequest, AppError> {
        let args = ToolArguments::new(tool, Some(&raw))?;
        build_request(tool, &args)
    }

    #[test]
    fn test_retrieve_endpoints() {
        let request = build(ToolName::RetrievePage, json!({"page_id": RAW_ID})).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.endpoint, format!("pages/{}", HYPHENATED));

        let bot = build(ToolName::RetrieveBotUser, json!({})).unwrap();
        assert_eq!(bot.endpoint, "users/me");

        let comments = build(ToolName::RetrieveComments, json!({"block_id": RAW_ID, "page_size": 5})).unwrap();
        assert_eq!(comments.endpoint, "comments");
        assert_eq!(comments.query_value("block_id"), Some(HYPHENATED));
        assert_eq!(comments.query_value("page_size"), Some("5"));
    }

    #[test]
    fn test_archive_and_restore() {
        let archive = build(ToolName::ArchivePage, json!({"page_id": RAW_ID})).unwrap();
        assert_eq!(archive.method, HttpMethod::Patch);
        assert_eq!(archive.body, Some(json!({"archived": true})));

        let restore = build(ToolName::RestorePage, json!({"page_id": RAW_ID})).unwrap();
        assert_eq!(restore.body, Some(json!({"archived": false})));
    }

    #[test]
    fn test_append_from_markdown() {
        let request = build(
            ToolName::AppendBlockChildren,
            json!({"block_id": RAW_ID, "markdown": "# Notes\n- first"}),
        )
        .unwrap();
        assert_eq!(request.endpoint, format!("blocks/{}/children", HYPHENATED));
        let body = request.body.unwrap();
        assert_eq!(body["children"][0]["type"], "heading_1");
        assert_eq!(body["children"][1]["type"], "bulleted_list_item");

        let empty = build(ToolName::AppendBlockChildren, json!({"block_id": RAW_ID, "markdown": "\n"}));
        assert!(matches!(empty, Err(AppError::InvalidArguments { .. })));
    }

    #[test]
    fn test_query_database_body() {
        let request = build(
            ToolName::QueryDatabase,
            json!({
                "database_id": RAW_ID,
                "filter": {"property": "Done", "checkbox": {"equals": false}},
                "page_size": 25,
                "start_cursor": "abc"
            }),
        )
        .unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.body,
            Some(json!({
                "filter": {"property": "Done", "checkbox": {"equals": false}},
                "page_size": 25,
                "start_cursor": "abc"
            }))
        );
    }

    #[test]
    fn test_update_requires_changes() {
        let result = build(ToolName::UpdatePage, json!({"page_id": RAW_ID}));
        assert!(matches!(result, Err(AppError::InvalidArguments { .. })));

        let request = build(ToolName::UpdatePage, json!({"page_id": RAW_ID, "archived": true})).unwrap();
        assert_eq!(request.body, Some(json!({"archived": true})));
    }

    #[test]
    fn test_comment_targets() {
        let on_page = build(ToolName::CreateComment, json!({"page_id": RAW_ID, "text": "Hello"})).unwrap();
        assert_eq!(
            on_page.body,
            Some(json!({
                "parent": {"page_id": HYPHENATED},
                "rich_text": [{"type": "text", "text": {"content": "Hello"}}]
            }))
        );

        let reply = build(ToolName::CreateComment, json!({"discussion_id": "d1", "text": "Re"})).unwrap();
        assert_eq!(reply.body.unwrap()["discussion_id"], "d1");

        assert!(build(ToolName::CreateComment, json!({"text": "orphan"})).is_err());
        assert!(build(ToolName::CreateComment, json!({"page_id": RAW_ID})).is_err());
    }

    #[test]
    fn test_page_size_out_of_range() {
        let result = build(ToolName::ListUsers, json!({"page_size": 101}));
        assert!(matches!(result, Err(AppError::InvalidArguments { .. })));
    }
}
