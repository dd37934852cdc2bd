// src/formatting/rich_text/mod.rs
//! Formats arrays of Notion rich-text runs into inline Markdown.

mod annotations;

use annotations::{MarkdownStyleRenderer, TextStyle};

use super::sanitize::sanitize;
use crate::model::JsonExt;
use serde_json::Value;

/// Renders a rich-text array into inline Markdown.
///
/// Anything other than an array renders as `""`. Runs are concatenated in
/// order with no separator.
pub fn render_rich_text(runs: &Value) -> String {
    match runs.as_array() {
        Some(items) => render_runs(items),
        None => String::new(),
    }
}

/// Renders a slice of rich-text runs into inline Markdown.
///
/// The joined text is sanitized again since a tag can be split across runs.
pub fn render_runs(runs: &[Value]) -> String {
    let joined: String = runs.iter().map(render_run).collect();
    sanitize(&joined)
}

/// Concatenated sanitized plain text of the runs, without any markers.
pub fn plain_text(runs: &Value) -> String {
    runs.as_array()
        .map(|items| sanitize(&items.iter().map(run_text).collect::<String>()))
        .unwrap_or_default()
}

/// Renders a single run: sanitized text, style markers, then the link.
fn render_run(run: &Value) -> String {
    let style = TextStyle::from_annotations(run.field("annotations"));
    let styled = MarkdownStyleRenderer::apply_styles(&run_text(run), &style);

    match run.non_empty_str("href") {
        Some(href) => MarkdownStyleRenderer::apply_link(&styled, &sanitize(href)),
        None => styled,
    }
}

/// The run's display text: `plain_text`, falling back to `text.content`.
fn run_text(run: &Value) -> String {
    let raw = run
        .str_field("plain_text")
        .or_else(|| run.str_at(&["text", "content"]))
        .unwrap_or_default();
    sanitize(raw)
}
