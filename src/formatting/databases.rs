// src/formatting/databases.rs
//! Database rendering: title, description, schema table, ID note and link.

use super::pages::{entity_id, page_url};
use super::properties::describe_schema;
use super::rich_text::render_rich_text;
use super::sanitize::sanitize;
use super::table::MarkdownTable;
use crate::constants::UNTITLED;
use crate::error::AppError;
use serde_json::Value;
use std::fmt::Write;

/// Composes a database into Markdown.
pub fn compose_database_markdown(database: &Value) -> Result<String, AppError> {
    let mut out = String::new();

    writeln!(out, "# {} (Database)", database_title(database))?;
    writeln!(out)?;

    let description = render_rich_text(database.get("description").unwrap_or(&Value::Null));
    if !description.is_empty() {
        writeln!(out, "{}", description)?;
        writeln!(out)?;
    }

    compose_schema_section(&mut out, database)?;

    writeln!(out, "> 🗃️ **Database ID:** `{}`", entity_id(database))?;
    if let Some(url) = page_url(database) {
        writeln!(out)?;
        writeln!(out, "[View in Notion]({})", url)?;
    }
    Ok(out)
}

/// Abbreviated form used inside lists.
pub fn compose_database_summary(database: &Value) -> Result<String, AppError> {
    let mut out = String::new();
    writeln!(out, "## {} (Database)", database_title(database))?;
    writeln!(out)?;
    if let Some(url) = page_url(database) {
        writeln!(out, "[View in Notion]({})", url)?;
        writeln!(out)?;
    }
    writeln!(out, "ID: `{}`", entity_id(database))?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    Ok(out)
}

/// Rendered title, or `Untitled` when it renders empty.
pub fn database_title(database: &Value) -> String {
    let title = render_rich_text(database.get("title").unwrap_or(&Value::Null));
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

fn compose_schema_section(out: &mut String, database: &Value) -> Result<(), AppError> {
    let Some(schema) = database.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    let mut table = MarkdownTable::new(["Property Name", "Type", "Details"]);
    for (name, property) in schema {
        let type_tag = property
            .get("type")
            .and_then(Value::as_str)
            .map(sanitize)
            .unwrap_or_default();
        table.push_row(vec![name.clone(), type_tag, describe_schema(property)]);
    }

    if !table.is_empty() {
        table.render(out)?;
        writeln!(out)?;
    }
    Ok(())
}
