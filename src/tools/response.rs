// src/tools/response.rs
//! Tool results as MCP `content` payloads.

use crate::error::AppError;
use crate::formatting::convert_to_markdown;
use crate::types::ResponseFormat;
use serde_json::{json, Value};

/// Text returned to the client plus the `isError` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    /// Formats an API response in the requested format.
    pub fn success(response: &Value, format: ResponseFormat) -> Self {
        let text = match format {
            ResponseFormat::Markdown => convert_to_markdown(response),
            ResponseFormat::Json => {
                serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
            }
        };
        Self {
            text,
            is_error: false,
        }
    }

    /// Describes a failure; transient API errors say so.
    pub fn failure(err: &AppError) -> Self {
        let mut text = format!("Error: {}", err);
        if let AppError::NotionApi { code, .. } = err {
            if code.is_retryable() {
                text.push_str("\nThis error is temporary; retrying the call later may succeed.");
            }
        }
        Self {
            text,
            is_error: true,
        }
    }

    /// The `tools/call` result body.
    pub fn to_json(&self) -> Value {
        json!({
            "content": [{"type": "text", "text": self.text}],
            "isError": self.is_error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotionErrorCode;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_and_json_formats() {
        let user = json!({"object": "user", "id": "u1", "type": "bot", "name": "Helper"});
        let markdown = ToolOutput::success(&user, ResponseFormat::Markdown);
        assert!(markdown.text.starts_with("👤 **Helper** (bot)"));
        assert!(!markdown.is_error);

        let raw = ToolOutput::success(&user, ResponseFormat::Json);
        assert_eq!(serde_json::from_str::<Value>(&raw.text).unwrap(), user);
    }

    #[test]
    fn test_failure_text() {
        let err = AppError::invalid_arguments("retrieve_page", "missing required argument 'page_id'");
        let output = ToolOutput::failure(&err);
        assert!(output.is_error);
        assert_snapshot!(output.text, @"Error: Invalid arguments for tool 'retrieve_page': missing required argument 'page_id'");
    }

    #[test]
    fn test_retryable_failure_mentions_retry() {
        let err = AppError::NotionApi {
            code: NotionErrorCode::RateLimited,
            message: "Slow down".to_string(),
            status: 429,
        };
        assert!(ToolOutput::failure(&err).text.contains("retrying"));
    }

    #[test]
    fn test_result_envelope() {
        let output = ToolOutput {
            text: "hi".to_string(),
            is_error: true,
        };
        assert_eq!(
            output.to_json(),
            json!({"content": [{"type": "text", "text": "hi"}], "isError": true})
        );
    }
}
