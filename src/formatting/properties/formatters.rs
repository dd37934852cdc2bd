// src/formatting/properties/formatters.rs
//! Type-specific formatting for Notion property values.
//!
//! Each formatter receives the type-specific payload (the value stored under
//! the key named by the property's `type`) and returns display text. Absent
//! or malformed payloads format as `""`.

use crate::formatting::rich_text::render_rich_text;
use crate::formatting::sanitize::{sanitize, sanitize_value};
use crate::model::JsonExt;
use serde_json::Value;

const DATE_RANGE_SEPARATOR: &str = " → ";
const DEFAULT_ATTACHMENT_NAME: &str = "Attachment";

// --- Text Formatters ---

pub fn format_text(runs: &Value) -> String {
    render_rich_text(runs)
}

// --- Number Formatter ---

pub fn format_number(number: &Value) -> String {
    match number {
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

// --- Select Formatters ---

pub fn format_option(option: &Value) -> String {
    option.str_field("name").map(sanitize).unwrap_or_default()
}

pub fn format_multi_select(options: &Value) -> String {
    join_non_empty(options, format_option)
}

// --- Date Formatter ---

pub fn format_date(date: &Value) -> String {
    let start = date.str_field("start").map(sanitize).unwrap_or_default();
    match date.non_empty_str("end") {
        Some(end) => format!("{}{}{}", start, DATE_RANGE_SEPARATOR, sanitize(end)),
        None => start,
    }
}

// --- People Formatters ---

/// A user's display name, falling back to the user ID.
pub fn format_user(user: &Value) -> String {
    user.non_empty_str("name")
        .or_else(|| user.str_field("id"))
        .map(sanitize)
        .unwrap_or_default()
}

pub fn format_people(people: &Value) -> String {
    join_non_empty(people, format_user)
}

// --- Files Formatter ---

pub fn format_files(files: &Value) -> String {
    join_non_empty(files, |file| {
        let name = file
            .non_empty_str("name")
            .map(sanitize)
            .unwrap_or_else(|| DEFAULT_ATTACHMENT_NAME.to_string());
        let url = file
            .str_at(&["file", "url"])
            .or_else(|| file.str_at(&["external", "url"]))
            .map(sanitize)
            .unwrap_or_default();
        format!("[{}]({})", name, url)
    })
}

// --- Checkbox Formatter ---

pub fn format_checkbox(checkbox: &Value) -> String {
    if checkbox.as_bool().unwrap_or(false) {
        "✓".to_string()
    } else {
        "✗".to_string()
    }
}

// --- Plain String Formatter (url, email, phone_number, timestamps) ---

pub fn format_plain(value: &Value) -> String {
    sanitize_value(value)
}

// --- Formula Formatter ---

/// First non-empty of the string, number, boolean or date result.
pub fn format_formula(formula: &Value) -> String {
    if let Some(s) = formula.non_empty_str("string") {
        return sanitize(s);
    }
    if let Some(n) = formula.field("number").filter(|n| n.is_number()) {
        return n.to_string();
    }
    if let Some(b) = formula.get("boolean").and_then(Value::as_bool) {
        return b.to_string();
    }
    formula.field("date").map(format_date).unwrap_or_default()
}

// --- Relation Formatter ---

pub fn format_relation(relation: &Value) -> String {
    join_non_empty(relation, |related| {
        related
            .non_empty_str("id")
            .map(|id| format!("`{}`", sanitize(id)))
            .unwrap_or_default()
    })
}

// --- Rollup Formatter ---

/// Arrays are dumped as compact JSON; scalar rollups show their value.
pub fn format_rollup(rollup: &Value) -> String {
    if rollup.str_field("type") == Some("array") {
        let array = rollup.field("array").cloned().unwrap_or(Value::Array(Vec::new()));
        return sanitize(&array.to_string());
    }
    if let Some(n) = rollup.field("number").filter(|n| n.is_number()) {
        return n.to_string();
    }
    if let Some(start) = rollup.field("date").and_then(|d| d.non_empty_str("start")) {
        return sanitize(start);
    }
    rollup.str_field("string").map(sanitize).unwrap_or_default()
}

// --- ID Formatters ---

pub fn format_unique_id(unique_id: &Value) -> String {
    let number = format_number(unique_id.get("number").unwrap_or(&Value::Null));
    match unique_id.non_empty_str("prefix") {
        Some(prefix) if !number.is_empty() => format!("{}-{}", sanitize(prefix), number),
        _ => number,
    }
}

pub fn format_verification(verification: &Value) -> String {
    verification.str_field("state").map(sanitize).unwrap_or_default()
}

// --- Helpers ---

/// Formats every element of a JSON array and joins the non-empty results.
fn join_non_empty(items: &Value, format_item: impl Fn(&Value) -> String) -> String {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(format_item)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}
