// src/api/parser.rs
//! Turns raw HTTP responses into JSON values or typed API errors.

use super::client::ApiResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::JsonExt;
use serde_json::Value;

/// Decodes a response body; non-2xx statuses become `AppError::NotionApi`.
pub fn parse_api_response(result: ApiResponse<String>) -> Result<Value, AppError> {
    if (200..300).contains(&result.status) {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

fn parse_success_body(body: &str, url: &str) -> Result<Value, AppError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error_body(body: &str, status: u16, url: &str) -> AppError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|error| error.non_empty_str("code"))
        .map(NotionErrorCode::from_api_response)
        .unwrap_or_else(|| NotionErrorCode::from_http_status(status));
    let message = parsed
        .as_ref()
        .and_then(|error| error.non_empty_str("message"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {} from {}: {}", status, url, preview(body)));

    if code.is_retryable() {
        log::warn!("Transient Notion API failure ({}) from {}", code, url);
    } else {
        log::debug!("Notion API error {} (HTTP {}) from {}", code, status, url);
    }

    AppError::NotionApi {
        code,
        message,
        status,
    }
}

/// At most `ERROR_BODY_PREVIEW_LENGTH` characters of a body.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
