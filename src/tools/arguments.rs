// src/tools/arguments.rs
//! Typed, validated reads over a tool call's `arguments` object.
//!
//! Every failure is an `AppError::InvalidArguments` naming the tool, so the
//! caller sees which argument to fix before any request is sent.

use super::catalog::ToolName;
use crate::error::AppError;
use crate::types::{NotionId, PageSize, ResponseFormat};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

static NO_ARGUMENTS: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// The arguments of one tool call.
pub struct ToolArguments<'a> {
    tool: ToolName,
    args: &'a Map<String, Value>,
}

impl<'a> ToolArguments<'a> {
    /// Accepts an object or `null`/absent arguments.
    pub fn new(tool: ToolName, arguments: Option<&'a Value>) -> Result<Self, AppError> {
        let args = match arguments {
            None | Some(Value::Null) => &*NO_ARGUMENTS,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(AppError::invalid_arguments(
                    tool.as_str(),
                    "arguments must be an object",
                ))
            }
        };
        Ok(Self { tool, args })
    }

    fn invalid(&self, reason: impl Into<String>) -> AppError {
        AppError::invalid_arguments(self.tool.as_str(), reason)
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.args.get(key).filter(|value| !value.is_null())
    }

    /// A required Notion ID, normalized to hyphenated form.
    pub fn id(&self, key: &str) -> Result<String, AppError> {
        let raw = self.required_string(key)?;
        NotionId::parse(&raw)
            .map(|id| id.to_hyphenated())
            .map_err(|e| self.invalid(format!("'{}': {}", key, e)))
    }

    /// An optional Notion ID, normalized to hyphenated form.
    pub fn optional_id(&self, key: &str) -> Result<Option<String>, AppError> {
        match self.optional_string(key)? {
            Some(raw) => NotionId::parse(&raw)
                .map(|id| Some(id.to_hyphenated()))
                .map_err(|e| self.invalid(format!("'{}': {}", key, e))),
            None => Ok(None),
        }
    }

    pub fn required_string(&self, key: &str) -> Result<String, AppError> {
        self.optional_string(key)?
            .ok_or_else(|| self.invalid(format!("missing required argument '{}'", key)))
    }

    /// A string argument; empty strings count as absent.
    pub fn optional_string(&self, key: &str) -> Result<Option<String>, AppError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(format!("'{}' must be a string", key))),
        }
    }

    pub fn required_object(&self, key: &str) -> Result<Value, AppError> {
        self.optional_object(key)?
            .ok_or_else(|| self.invalid(format!("missing required argument '{}'", key)))
    }

    pub fn optional_object(&self, key: &str) -> Result<Option<Value>, AppError> {
        match self.present(key) {
            None => Ok(None),
            Some(value @ Value::Object(_)) => Ok(Some(value.clone())),
            Some(_) => Err(self.invalid(format!("'{}' must be an object", key))),
        }
    }

    pub fn optional_array(&self, key: &str) -> Result<Option<Value>, AppError> {
        match self.present(key) {
            None => Ok(None),
            Some(value @ Value::Array(_)) => Ok(Some(value.clone())),
            Some(_) => Err(self.invalid(format!("'{}' must be an array", key))),
        }
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, AppError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(_) => Err(self.invalid(format!("'{}' must be a boolean", key))),
        }
    }

    /// `page_size`, an integer in `1..=100`.
    pub fn page_size(&self) -> Result<Option<PageSize>, AppError> {
        match self.present("page_size") {
            None => Ok(None),
            Some(value) => {
                let number = value
                    .as_i64()
                    .ok_or_else(|| self.invalid("'page_size' must be an integer"))?;
                PageSize::new(number)
                    .map(Some)
                    .map_err(|e| self.invalid(format!("'page_size': {}", e)))
            }
        }
    }

    /// `start_cursor`, a non-empty string.
    pub fn start_cursor(&self) -> Result<Option<String>, AppError> {
        match self.present("start_cursor") {
            None => Ok(None),
            Some(Value::String(cursor)) if !cursor.is_empty() => Ok(Some(cursor.clone())),
            Some(_) => Err(self.invalid("'start_cursor' must be a non-empty string")),
        }
    }

    /// `format`, falling back to the server default.
    pub fn format(&self, default: ResponseFormat) -> Result<ResponseFormat, AppError> {
        match self.optional_string("format")? {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|e| self.invalid(format!("'format': {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason(err: AppError) -> String {
        match err {
            AppError::InvalidArguments { reason, .. } => reason,
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_id_normalization() {
        let raw = json!({"page_id": "b55c9c91384d452b81dbd1ef79372b75"});
        let args = ToolArguments::new(ToolName::RetrievePage, Some(&raw)).unwrap();
        assert_eq!(args.id("page_id").unwrap(), "b55c9c91-384d-452b-81db-d1ef79372b75");

        let missing = reason(args.id("block_id").unwrap_err());
        assert!(missing.contains("missing required argument 'block_id'"));
    }

    #[test]
    fn test_invalid_id() {
        let raw = json!({"page_id": "not-an-id"});
        let args = ToolArguments::new(ToolName::RetrievePage, Some(&raw)).unwrap();
        assert!(reason(args.id("page_id").unwrap_err()).starts_with("'page_id':"));
    }

    #[test]
    fn test_page_size_bounds() {
        for (value, ok) in [(json!(1), true), (json!(100), true), (json!(0), false), (json!(101), false), (json!("5"), false)] {
            let raw = json!({"page_size": value});
            let args = ToolArguments::new(ToolName::Search, Some(&raw)).unwrap();
            assert_eq!(args.page_size().is_ok(), ok, "page_size {}", raw);
        }
    }

    #[test]
    fn test_format_default_and_override() {
        let args = ToolArguments::new(ToolName::Search, None).unwrap();
        assert_eq!(args.format(ResponseFormat::Json).unwrap(), ResponseFormat::Json);

        let raw = json!({"format": "markdown"});
        let args = ToolArguments::new(ToolName::Search, Some(&raw)).unwrap();
        assert_eq!(args.format(ResponseFormat::Json).unwrap(), ResponseFormat::Markdown);

        let raw = json!({"format": "xml"});
        let args = ToolArguments::new(ToolName::Search, Some(&raw)).unwrap();
        assert!(args.format(ResponseFormat::Markdown).is_err());
    }

    #[test]
    fn test_type_mismatches() {
        let raw = json!({"filter": [], "sorts": {}, "archived": "yes", "start_cursor": ""});
        let args = ToolArguments::new(ToolName::QueryDatabase, Some(&raw)).unwrap();
        assert!(args.optional_object("filter").is_err());
        assert!(args.optional_array("sorts").is_err());
        assert!(args.optional_bool("archived").is_err());
        assert!(args.start_cursor().is_err());
        assert_eq!(args.optional_object("absent").unwrap(), None);
    }

    #[test]
    fn test_non_object_arguments() {
        assert!(ToolArguments::new(ToolName::Search, Some(&json!([1, 2]))).is_err());
        assert!(ToolArguments::new(ToolName::Search, Some(&Value::Null)).is_ok());
    }
}
