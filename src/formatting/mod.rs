// src/formatting/mod.rs
//! Renders Notion API responses into Markdown.
//!
//! `convert_to_markdown` is the only entry point that never fails: any
//! error or panic inside a renderer is logged and replaced with a fixed
//! message telling the caller to ask for JSON instead.

pub mod block_renderer;
mod databases;
mod lists;
mod pages;
mod people;
mod properties;
mod rich_text;
pub mod sanitize;
mod table;
pub mod text_to_blocks;

pub use self::block_renderer::render_block;
pub use self::properties::{describe_schema, render_property_value};
pub use self::rich_text::{plain_text, render_rich_text};
pub use self::text_to_blocks::markdown_to_blocks;

use crate::constants::RENDER_FAILURE_MESSAGE;
use crate::error::AppError;
use crate::model::ObjectKind;
use sanitize::sanitize;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

/// Converts any API response into Markdown.
///
/// `null` renders as the empty string. Objects without a recognized
/// `object` discriminator render as a fenced JSON dump.
pub fn convert_to_markdown(entity: &Value) -> String {
    if entity.is_null() {
        return String::new();
    }

    render_guarded(&describe_kind(entity), || render_entity(entity))
}

/// Runs a renderer, replacing any error or panic with the failure message.
fn render_guarded<F>(kind: &str, render: F) -> String
where
    F: FnOnce() -> Result<String, AppError>,
{
    match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(Ok(markdown)) => markdown,
        Ok(Err(err)) => {
            log::error!("Failed to render {} as Markdown: {}", kind, err);
            RENDER_FAILURE_MESSAGE.to_string()
        }
        Err(_) => {
            log::error!("Renderer panicked while converting {} to Markdown", kind);
            RENDER_FAILURE_MESSAGE.to_string()
        }
    }
}

/// Dispatches on the `object` discriminator.
pub(crate) fn render_entity(entity: &Value) -> Result<String, AppError> {
    match ObjectKind::of(entity) {
        Some(ObjectKind::Page) => pages::compose_page_markdown(entity),
        Some(ObjectKind::Database) => databases::compose_database_markdown(entity),
        Some(ObjectKind::Block) => Ok(render_block(entity)),
        Some(ObjectKind::List) => lists::compose_list_markdown(entity),
        Some(ObjectKind::User) => people::compose_user_markdown(entity),
        Some(ObjectKind::Comment) => people::compose_comment_markdown(entity),
        Some(ObjectKind::Unknown(_)) | None => render_raw(entity),
    }
}

/// Pretty JSON dump. Strings are sanitized before serialization, where
/// quotes are still unescaped.
fn render_raw(entity: &Value) -> Result<String, AppError> {
    let pretty = serde_json::to_string_pretty(&sanitize_tree(entity))?;
    Ok(format!("```json\n{}\n```", pretty))
}

fn sanitize_tree(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_tree).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (sanitize(key), sanitize_tree(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn describe_kind(entity: &Value) -> String {
    ObjectKind::of(entity)
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "untyped object".to_string())
}
