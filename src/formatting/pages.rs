// src/formatting/pages.rs
//! Page rendering: title, property table, ID note and source link.

use super::properties::{is_title, render_property_value};
use super::rich_text::render_rich_text;
use super::sanitize::sanitize;
use super::table::MarkdownTable;
use crate::constants::UNTITLED;
use crate::error::AppError;
use crate::model::JsonExt;
use serde_json::Value;
use std::fmt::Write;

/// Composes a page into Markdown: title, properties, ID note, link.
pub fn compose_page_markdown(page: &Value) -> Result<String, AppError> {
    let mut out = String::new();
    compose_title_section(&mut out, page)?;
    compose_properties_section(&mut out, page)?;
    compose_note_section(&mut out, page)?;
    compose_link_section(&mut out, page)?;
    Ok(out)
}

/// Abbreviated form used inside lists: title, link, ID, rule.
pub fn compose_page_summary(page: &Value) -> Result<String, AppError> {
    let mut out = String::new();
    let title = page_title(page).unwrap_or_else(|| UNTITLED.to_string());
    writeln!(out, "## {}", title)?;
    writeln!(out)?;
    if let Some(url) = page_url(page) {
        writeln!(out, "[View in Notion]({})", url)?;
        writeln!(out)?;
    }
    writeln!(out, "ID: `{}`", entity_id(page))?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    Ok(out)
}

/// The rendered text of the page's title-typed property, when non-empty.
pub fn page_title(page: &Value) -> Option<String> {
    let properties = page.get("properties")?.as_object()?;
    let title_property = properties.values().find(|value| is_title(value))?;
    let title = render_rich_text(title_property.get("title")?);
    (!title.is_empty()).then_some(title)
}

fn compose_title_section(out: &mut String, page: &Value) -> Result<(), AppError> {
    if let Some(title) = page_title(page) {
        writeln!(out, "# {}", title)?;
        writeln!(out)?;
    }
    Ok(())
}

fn compose_properties_section(out: &mut String, page: &Value) -> Result<(), AppError> {
    let Some(properties) = page.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    let mut table = MarkdownTable::new(["Property", "Value"]);
    for (name, value) in properties {
        if is_title(value) {
            continue;
        }
        table.push_row(vec![name.clone(), render_property_value(value)]);
    }

    if !table.is_empty() {
        table.render(out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn compose_note_section(out: &mut String, page: &Value) -> Result<(), AppError> {
    writeln!(out, "> 📄 **Page ID:** `{}`", entity_id(page))?;
    if page.flag("archived") || page.flag("in_trash") {
        writeln!(out, "> This page is archived.")?;
    }
    writeln!(out, "> Fetch the page's child blocks to read its content.")?;
    Ok(())
}

fn compose_link_section(out: &mut String, page: &Value) -> Result<(), AppError> {
    if let Some(url) = page_url(page) {
        writeln!(out)?;
        writeln!(out, "[View in Notion]({})", url)?;
    }
    Ok(())
}

pub(super) fn page_url(entity: &Value) -> Option<String> {
    entity.non_empty_str("url").map(sanitize)
}

pub(super) fn entity_id(entity: &Value) -> String {
    entity
        .non_empty_str("id")
        .map(sanitize)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_page() -> Value {
        json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "url": "https://www.notion.so/Bug-bash-598337872cf94fdf8782e53db20768a5",
            "archived": false,
            "properties": {
                "Date": {"id": "a", "type": "date", "date": {"start": "2023-02-23", "end": null}},
                "Done": {"id": "b", "type": "checkbox", "checkbox": true},
                "Name": {"id": "title", "type": "title", "title": [
                    {"type": "text", "plain_text": "Bug bash", "annotations": {}, "href": null}
                ]}
            }
        })
    }

    #[test]
    fn test_page_markdown() {
        let markdown = compose_page_markdown(&sample_page()).unwrap();
        assert_eq!(
            markdown,
            "# Bug bash\n\
             \n\
             | Property | Value |\n\
             | --- | --- |\n\
             | Date | 2023-02-23 |\n\
             | Done | ✓ |\n\
             \n\
             > 📄 **Page ID:** `59833787-2cf9-4fdf-8782-e53db20768a5`\n\
             > Fetch the page's child blocks to read its content.\n\
             \n\
             [View in Notion](https://www.notion.so/Bug-bash-598337872cf94fdf8782e53db20768a5)\n"
        );
    }

    #[test]
    fn test_page_without_title_or_properties() {
        let page = json!({"object": "page", "id": "p1"});
        let markdown = compose_page_markdown(&page).unwrap();
        assert!(markdown.starts_with("> 📄 **Page ID:** `p1`"));
        assert!(!markdown.contains("View in Notion"));
        assert_eq!(page_title(&page), None);
    }

    #[test]
    fn test_archived_note() {
        let page = json!({"object": "page", "id": "p1", "archived": true, "properties": {}});
        assert!(compose_page_markdown(&page).unwrap().contains("archived"));
    }

    #[test]
    fn test_page_summary() {
        let summary = compose_page_summary(&sample_page()).unwrap();
        assert!(summary.starts_with("## Bug bash\n\n[View in Notion]("));
        assert!(summary.contains("ID: `59833787-2cf9-4fdf-8782-e53db20768a5`"));
        assert!(summary.ends_with("---\n\n"));

        let untitled = compose_page_summary(&json!({"id": "x"})).unwrap();
        assert!(untitled.starts_with("## Untitled\n\nID: `x`"));
    }
}
