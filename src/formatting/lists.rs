// src/formatting/lists.rs
//! Paginated list responses.
//!
//! The heading follows the kind of the first result. Items of that kind get
//! the abbreviated layout; anything else falls back to the full converter.

use super::block_renderer::render_block;
use super::databases::compose_database_summary;
use super::pages::compose_page_summary;
use super::render_entity;
use super::sanitize::sanitize;
use crate::constants::CHARS_PER_ITEM_ESTIMATE;
use crate::error::AppError;
use crate::model::{JsonExt, ObjectKind};
use serde_json::Value;
use std::fmt::Write;

/// Composes a `list` object into Markdown.
pub fn compose_list_markdown(list: &Value) -> Result<String, AppError> {
    let results = list.array_field("results");
    if results.is_empty() {
        let mut out = String::from("# Results\n\n_No results._\n");
        compose_pagination_note(&mut out, list)?;
        return Ok(out);
    }

    let list_kind = results.first().and_then(ObjectKind::of);
    let mut out = String::with_capacity(results.len() * CHARS_PER_ITEM_ESTIMATE);
    writeln!(out, "# {}", heading_for(list_kind.as_ref()))?;
    writeln!(out)?;

    log::debug!(
        "Rendering list of {} results (kind {:?})",
        results.len(),
        list_kind
    );

    for item in results {
        let item_kind = ObjectKind::of(item);
        if item_kind != list_kind {
            push_full_item(&mut out, item)?;
            continue;
        }
        match item_kind {
            Some(ObjectKind::Page) => out.push_str(&compose_page_summary(item)?),
            Some(ObjectKind::Database) => out.push_str(&compose_database_summary(item)?),
            Some(ObjectKind::Block) => {
                let rendered = render_block(item);
                if !rendered.is_empty() {
                    writeln!(out, "{}", rendered)?;
                    writeln!(out)?;
                }
            }
            _ => push_full_item(&mut out, item)?,
        }
    }

    compose_pagination_note(&mut out, list)?;
    Ok(out)
}

fn heading_for(kind: Option<&ObjectKind>) -> &'static str {
    match kind {
        Some(ObjectKind::Page) => "Pages",
        Some(ObjectKind::Database) => "Databases",
        Some(ObjectKind::Block) => "Blocks",
        _ => "Results",
    }
}

fn push_full_item(out: &mut String, item: &Value) -> Result<(), AppError> {
    let rendered = render_entity(item)?;
    let rendered = rendered.trim_end();
    if !rendered.is_empty() {
        writeln!(out, "{}", rendered)?;
        writeln!(out)?;
    }
    Ok(())
}

fn compose_pagination_note(out: &mut String, list: &Value) -> Result<(), AppError> {
    if !list.flag("has_more") {
        return Ok(());
    }
    match list.non_empty_str("next_cursor") {
        Some(cursor) => writeln!(
            out,
            "> More results are available. Pass the next cursor `{}` as `start_cursor` to continue.",
            sanitize(cursor)
        )?,
        None => writeln!(
            out,
            "> More results are available, but the response did not include a next cursor."
        )?,
    }
    Ok(())
}
