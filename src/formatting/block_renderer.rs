// src/formatting/block_renderer.rs
//! Block rendering engine: converts one Notion block to Markdown.
//!
//! Rendering is one level deep. Children are never inlined; blocks whose
//! content lives in children render a placeholder naming the block to fetch.

use super::rich_text::{plain_text, render_rich_text};
use super::sanitize::{escape_cell, sanitize};
use crate::model::{BlockType, JsonExt};
use serde_json::Value;

const DEFAULT_CALLOUT_ICON: &str = "💡";

/// A block's tag, id and type-specific payload, read defensively.
struct BlockView<'a> {
    block_type: BlockType,
    id: String,
    payload: &'a Value,
}

impl<'a> BlockView<'a> {
    fn read(block: &'a Value) -> Option<Self> {
        let tag = block.non_empty_str("type")?;
        let block_type = BlockType::from_tag(tag);
        let payload = match block.field(tag) {
            Some(payload) => payload,
            None if block_type.allows_missing_payload() => &Value::Null,
            None => {
                log::debug!("Block of type {} has no payload", tag);
                return None;
            }
        };

        Some(Self {
            block_type,
            id: block.str_field("id").map(sanitize).unwrap_or_default(),
            payload,
        })
    }

    /// Inline Markdown of the payload's `rich_text`.
    fn text(&self) -> String {
        render_rich_text(self.payload.get("rich_text").unwrap_or(&Value::Null))
    }

    /// Trailing instruction for content that needs a separate fetch.
    fn fetch_hint(&self, what: &str) -> String {
        format!("fetch the child blocks of `{}` to view {}", self.id, what)
    }
}

// --- Public API ---

/// Renders a single block into Markdown.
///
/// Returns `""` for non-objects, blocks without a `type`, and blocks whose
/// payload is missing (dividers excepted).
pub fn render_block(block: &Value) -> String {
    let Some(view) = BlockView::read(block) else {
        return String::new();
    };

    match &view.block_type {
        BlockType::Paragraph => view.text(),
        BlockType::Heading1 => format!("# {}", view.text()),
        BlockType::Heading2 => format!("## {}", view.text()),
        BlockType::Heading3 => format!("### {}", view.text()),
        BlockType::BulletedListItem => format!("- {}", view.text()),
        BlockType::NumberedListItem => format!("1. {}", view.text()),
        BlockType::ToDo => format_to_do(&view),
        BlockType::Toggle => format!(
            "▶ {}\n\n_Toggle content: {}._",
            view.text(),
            view.fetch_hint("it")
        ),
        BlockType::Quote => format_quote(&view.text()),
        BlockType::Callout => format_callout(&view),
        BlockType::Code => format_code(&view),
        BlockType::Equation => format!(
            "$$\n{}\n$$",
            view.payload.str_field("expression").map(sanitize).unwrap_or_default()
        ),
        BlockType::Divider => "---".to_string(),
        BlockType::Breadcrumb => "_Breadcrumb_".to_string(),
        BlockType::TableOfContents => "_Table of contents_".to_string(),
        BlockType::Image => format!("!{}", format_media(&view)),
        BlockType::File | BlockType::Video | BlockType::Pdf | BlockType::Audio => {
            format_media(&view)
        }
        BlockType::Bookmark | BlockType::Embed | BlockType::LinkPreview => {
            let url = view.payload.str_field("url").map(sanitize).unwrap_or_default();
            format!("[{}]({})", url, url)
        }
        BlockType::ChildPage => format!(
            "📄 **{}** (child page `{}`)",
            title_of(view.payload),
            view.id
        ),
        BlockType::ChildDatabase => format!(
            "🗃️ **{}** (child database `{}`)",
            title_of(view.payload),
            view.id
        ),
        BlockType::LinkToPage => format_link_to_page(view.payload),
        BlockType::Table => {
            let width = view
                .payload
                .get("table_width")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            format!(
                "_Table with {} columns: {}._",
                width,
                view.fetch_hint("its rows")
            )
        }
        BlockType::TableRow => format_table_row(view.payload),
        BlockType::ColumnList => format!("_Column layout: {}._", view.fetch_hint("its columns")),
        BlockType::Column => format!("_Column: {}._", view.fetch_hint("its content")),
        BlockType::SyncedBlock => format_synced_block(&view),
        BlockType::Template => format!(
            "_Template \"{}\": {}._",
            view.text(),
            view.fetch_hint("its content")
        ),
        BlockType::Unknown(tag) => format!("Unsupported block type: {}", sanitize(tag)),
    }
}

// --- Per-type templates ---

fn format_to_do(view: &BlockView) -> String {
    let mark = if view.payload.flag("checked") { "x" } else { " " };
    format!("- [{}] {}", mark, view.text())
}

/// Prefixes every line so multi-line quotes stay inside the quote.
fn format_quote(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_callout(view: &BlockView) -> String {
    let icon = view
        .payload
        .field("icon")
        .and_then(|icon| icon.non_empty_str("emoji"))
        .map(sanitize)
        .unwrap_or_else(|| DEFAULT_CALLOUT_ICON.to_string());
    format!("> {} {}", icon, view.text())
}

/// Code keeps its raw text; annotation markers would corrupt the fence.
fn format_code(view: &BlockView) -> String {
    let language = view.payload.str_field("language").map(sanitize).unwrap_or_default();
    let code = plain_text(view.payload.get("rich_text").unwrap_or(&Value::Null));
    format!("```{}\n{}\n```", language, code)
}

/// `[caption](url)`; the caller adds `!` for images.
fn format_media(view: &BlockView) -> String {
    let url = view
        .payload
        .str_at(&["external", "url"])
        .or_else(|| view.payload.str_at(&["file", "url"]))
        .map(sanitize)
        .unwrap_or_default();

    let caption = render_rich_text(view.payload.get("caption").unwrap_or(&Value::Null));
    let caption = if caption.is_empty() {
        view.block_type
            .default_media_caption()
            .unwrap_or("File")
            .to_string()
    } else {
        caption
    };

    format!("[{}]({})", caption, url)
}

fn format_link_to_page(payload: &Value) -> String {
    let target = ["page_id", "database_id", "comment_id"]
        .iter()
        .find_map(|key| payload.non_empty_str(key).map(|id| (*key, id)));

    match target {
        Some(("database_id", id)) => format!("🔗 Link to database `{}`", sanitize(id)),
        Some(("comment_id", id)) => format!("🔗 Link to comment `{}`", sanitize(id)),
        Some((_, id)) => format!("🔗 Link to page `{}`", sanitize(id)),
        None => "🔗 Link to page".to_string(),
    }
}

fn format_table_row(payload: &Value) -> String {
    let cells: Vec<String> = payload
        .array_field("cells")
        .iter()
        .map(|cell| escape_cell(&render_rich_text(cell)))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn format_synced_block(view: &BlockView) -> String {
    match view
        .payload
        .field("synced_from")
        .and_then(|from| from.non_empty_str("block_id"))
    {
        Some(source) => format!(
            "_Synced block (copy of `{}`): {}._",
            sanitize(source),
            view.fetch_hint("its content")
        ),
        None => format!("_Synced block: {}._", view.fetch_hint("its content")),
    }
}

fn title_of(payload: &Value) -> String {
    payload.str_field("title").map(sanitize).unwrap_or_default()
}
