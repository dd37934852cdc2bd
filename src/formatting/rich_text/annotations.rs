// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.
//!
//! Markers are textual, so the order in which they are applied decides the
//! visual nesting: code innermost, then bold, italic, strikethrough, and the
//! link wraps everything.

use serde_json::Value;

use crate::model::JsonExt;

/// Inline styling carried by one rich-text run.
///
/// `underline` and `color` are read but have no Markdown marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Option<String>,
}

impl TextStyle {
    /// Reads an `annotations` object; anything missing reads as unstyled.
    pub fn from_annotations(annotations: Option<&Value>) -> Self {
        let Some(annotations) = annotations else {
            return Self::default();
        };

        Self {
            bold: annotations.flag("bold"),
            italic: annotations.flag("italic"),
            strikethrough: annotations.flag("strikethrough"),
            underline: annotations.flag("underline"),
            code: annotations.flag("code"),
            color: annotations
                .non_empty_str("color")
                .filter(|c| *c != "default")
                .map(str::to_string),
        }
    }
}

/// Renderer for text styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Applies styles to text content for Markdown output.
    pub fn apply_styles(content: &str, style: &TextStyle) -> String {
        let mut result = content.to_string();

        if style.code {
            result = format!("`{}`", result);
        }

        if style.bold {
            result = format!("**{}**", result);
        }

        if style.italic {
            result = format!("*{}*", result);
        }

        if style.strikethrough {
            result = format!("~~{}~~", result);
        }

        if style.underline || style.color.is_some() {
            log::trace!("Dropping underline/color annotation on {:?}", content);
        }

        result
    }

    /// Wraps already styled text in a Markdown link.
    pub fn apply_link(content: &str, href: &str) -> String {
        format!("[{}]({})", content, href)
    }
}
