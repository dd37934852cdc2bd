// src/formatting/text_to_blocks.rs
//! Converts simple Markdown into Notion block objects for appending.
//!
//! Line-oriented and deliberately small: it is not an inverse of the
//! renderer, and text is sent without annotations.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s+(.*)$").expect("numbered item pattern is valid"));

static TO_DO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+\[([ xX])\]\s*(.*)$").expect("to-do pattern is valid"));

/// Converts Markdown text into a list of block objects.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Value> {
    let mut blocks = Vec::new();
    let mut lines = markdown.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(language) = trimmed.strip_prefix("```") {
            let mut code = Vec::new();
            for code_line in lines.by_ref() {
                if code_line.trim_start().starts_with("```") {
                    break;
                }
                code.push(code_line);
            }
            blocks.push(code_block(&code.join("\n"), language.trim()));
            continue;
        }

        blocks.push(line_to_block(trimmed));
    }

    log::debug!("Converted Markdown into {} blocks", blocks.len());
    blocks
}

fn line_to_block(line: &str) -> Value {
    if line == "---" || line == "***" {
        return json!({"object": "block", "type": "divider", "divider": {}});
    }
    if let Some(captures) = TO_DO.captures(line) {
        let checked = &captures[1] != " ";
        return json!({
            "object": "block",
            "type": "to_do",
            "to_do": {"rich_text": plain_runs(&captures[2]), "checked": checked}
        });
    }
    if let Some(text) = line.strip_prefix("### ") {
        return text_block("heading_3", text);
    }
    if let Some(text) = line.strip_prefix("## ") {
        return text_block("heading_2", text);
    }
    if let Some(text) = line.strip_prefix("# ") {
        return text_block("heading_1", text);
    }
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return text_block("bulleted_list_item", text);
    }
    if let Some(captures) = NUMBERED_ITEM.captures(line) {
        return text_block("numbered_list_item", &captures[1]);
    }
    if let Some(text) = line.strip_prefix("> ").or_else(|| line.strip_prefix('>')) {
        return text_block("quote", text);
    }
    text_block("paragraph", line)
}

fn text_block(block_type: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "type": block_type,
        block_type: {"rich_text": plain_runs(text.trim())}
    })
}

fn code_block(code: &str, language: &str) -> Value {
    let language = if language.is_empty() { "plain text" } else { language };
    json!({
        "object": "block",
        "type": "code",
        "code": {"rich_text": plain_runs(code), "language": language}
    })
}

fn plain_runs(text: &str) -> Value {
    if text.is_empty() {
        return json!([]);
    }
    json!([{"type": "text", "text": {"content": text}}])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::render_block;
    use pretty_assertions::assert_eq;

    fn types(blocks: &[Value]) -> Vec<&str> {
        blocks
            .iter()
            .map(|block| block["type"].as_str().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_line_kinds() {
        let blocks = markdown_to_blocks(
            "# Title\n## Sub\n### Minor\n- one\n* two\n3. three\n- [ ] open\n- [x] done\n> quoted\n---\nplain text",
        );
        assert_eq!(
            types(&blocks),
            vec![
                "heading_1",
                "heading_2",
                "heading_3",
                "bulleted_list_item",
                "bulleted_list_item",
                "numbered_list_item",
                "to_do",
                "to_do",
                "quote",
                "divider",
                "paragraph"
            ]
        );
        assert_eq!(blocks[6]["to_do"]["checked"], json!(false));
        assert_eq!(blocks[7]["to_do"]["checked"], json!(true));
        assert_eq!(blocks[5]["numbered_list_item"]["rich_text"][0]["text"]["content"], json!("three"));
    }

    #[test]
    fn test_fenced_code() {
        let blocks = markdown_to_blocks("```rust\nfn main() {}\n\nlet x = 1;\n```\nafter");
        assert_eq!(types(&blocks), vec!["code", "paragraph"]);
        assert_eq!(blocks[0]["code"]["language"], json!("rust"));
        assert_eq!(
            blocks[0]["code"]["rich_text"][0]["text"]["content"],
            json!("fn main() {}\n\nlet x = 1;")
        );
    }

    #[test]
    fn test_unterminated_fence_takes_rest() {
        let blocks = markdown_to_blocks("```\nline");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["code"]["language"], json!("plain text"));
    }

    #[test]
    fn test_blank_input() {
        assert!(markdown_to_blocks("\n  \n").is_empty());
    }

    #[test]
    fn test_converted_blocks_render_back() {
        let blocks = markdown_to_blocks("## Kale\n- [x] buy");
        assert_eq!(render_block(&blocks[0]), "## Kale");
        assert_eq!(render_block(&blocks[1]), "- [x] buy");
    }
}
