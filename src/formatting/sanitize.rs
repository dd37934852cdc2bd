// src/formatting/sanitize.rs
//! Display-safety helpers applied to every untrusted string before it is
//! placed in rendered output.
//!
//! Stripping is pattern based and best effort. It keeps rendered Markdown
//! free of obvious script payloads; it is not an HTML sanitizer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script block pattern is valid")
});

static SCRIPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?script\b[^>]*>?").expect("script tag pattern is valid"));

static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bon[a-z]+\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("event handler pattern is valid")
});

static DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)data:[a-z0-9.+-]+/[a-z0-9.+-]+(?:;[a-z0-9=.+-]+)*;base64,[a-z0-9+/=]*")
        .expect("data uri pattern is valid")
});

/// Removes script blocks, inline event handlers and base64 data URIs.
///
/// Repeats until nothing changes, so fragments that reassemble into a
/// script tag after one pass are removed as well.
pub fn sanitize(input: &str) -> String {
    let mut current = strip_once(input);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let without_blocks = SCRIPT_BLOCK.replace_all(input, "");
    let without_tags = SCRIPT_TAG.replace_all(&without_blocks, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_tags, "");
    DATA_URI.replace_all(&without_handlers, "").into_owned()
}

/// Sanitizes a JSON string value; any other JSON value yields `""`.
pub fn sanitize_value(value: &Value) -> String {
    value.as_str().map(sanitize).unwrap_or_default()
}

/// Sanitizes text and escapes the characters that would break a table row.
pub fn escape_cell(input: &str) -> String {
    sanitize(input)
        .replace('|', "\\|")
        .replace('+', "\\+")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
