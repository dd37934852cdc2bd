// tests/rendering.rs
//! End-to-end rendering of whole API responses.

mod common;

use common::fixture;
use insta::assert_snapshot;
use notion_mcp::{convert_to_markdown, render_rich_text, RENDER_FAILURE_MESSAGE};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn run(text: &str, annotations: Value) -> Value {
    json!({"type": "text", "plain_text": text, "annotations": annotations, "href": null})
}

#[test]
fn test_rendering_is_total() {
    let inputs = [
        Value::Null,
        json!({}),
        json!([]),
        json!("just a string"),
        json!({"object": "spaceship"}),
        json!({"object": "page", "properties": null}),
        json!({"object": "page", "properties": {"Broken": {"type": "select", "select": 42}}}),
        json!({"object": "database", "title": "not an array", "properties": []}),
        json!({"object": "list", "results": {"not": "an array"}}),
        json!({"object": "list", "results": [null, 3, {"object": "block"}]}),
        json!({"object": "block", "type": "image"}),
        json!({"object": "user"}),
        json!({"object": "comment", "rich_text": 7}),
    ];

    for input in &inputs {
        let rendered = convert_to_markdown(input);
        assert_ne!(rendered, RENDER_FAILURE_MESSAGE, "input {} hit the failure path", input);
    }
    assert_eq!(convert_to_markdown(&Value::Null), "");
}

#[test]
fn test_page_fixture() {
    let markdown = convert_to_markdown(&fixture("page.json"));
    let expected = "\
# Bug bash

| Property | Value |
| --- | --- |
| Last edited time | 2022-07-06T20:25:00.000Z |
| Date | 2023-02-23 |
| Tags | Bugs, Q1 |
| Estimate | 2.5 |
| Assignee | Kimberlee Johnson |
| Notes | Check the \\| pipes |

> 📄 **Page ID:** `59833787-2cf9-4fdf-8782-e53db20768a5`
> Fetch the page's child blocks to read its content.

[View in Notion](https://www.notion.so/Bug-bash-598337872cf94fdf8782e53db20768a5)
";
    assert_eq!(markdown, expected);
    assert!(!markdown.contains("→"));
    assert!(!markdown.contains("<script"));
}

#[test]
fn test_database_fixture() {
    let markdown = convert_to_markdown(&fixture("database.json"));
    assert!(markdown.starts_with("# Grocery List (Database)\n\n| Property Name | Type | Details |\n"));
    assert!(markdown.contains("| Tags | multi_select | Options: A, B |"));
    assert!(markdown.contains("| Recipes | relation | Related to: `668d797c-76fa-4934-9b05-ad288df2d136` |"));
    assert!(markdown.contains("| Cost | formula | Formula: `prop(\"Price\") * 2` |"));
    assert!(markdown.contains("| Name | title | Primary title column |"));
    assert!(markdown.contains("> 🗃️ **Database ID:** `bc1211ca-e3f1-4939-ae34-5260b16f627c`"));
}

#[test]
fn test_heading_block_exact() {
    let block = json!({
        "object": "block",
        "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
        "type": "heading_2",
        "heading_2": {
            "rich_text": [run("Lacinato kale", json!({
                "bold": false, "italic": false, "strikethrough": false,
                "underline": false, "code": false, "color": "default"
            }))],
            "color": "default",
            "is_toggleable": false
        }
    });
    assert_snapshot!(convert_to_markdown(&block), @"## Lacinato kale");
}

#[test]
fn test_page_list_with_cursor() {
    let page = |id: &str, title: &str| {
        json!({
            "object": "page",
            "id": id,
            "url": format!("https://www.notion.so/{}", id.replace('-', "")),
            "properties": {"Name": {"type": "title", "title": [run(title, json!({}))]}}
        })
    };
    let list = json!({
        "object": "list",
        "results": [
            page("11111111-1111-1111-1111-111111111111", "First"),
            page("22222222-2222-2222-2222-222222222222", "Second")
        ],
        "next_cursor": "fe2cc560-036c-44cd-90e8-294d5a74cebc",
        "has_more": true,
        "type": "page_or_database"
    });

    let markdown = convert_to_markdown(&list);
    let expected_start = "\
# Pages

## First

[View in Notion](https://www.notion.so/11111111111111111111111111111111)

ID: `11111111-1111-1111-1111-111111111111`

---

## Second

[View in Notion](https://www.notion.so/22222222222222222222222222222222)

ID: `22222222-2222-2222-2222-222222222222`

---
";
    assert!(markdown.starts_with(expected_start), "got:\n{}", markdown);
    let note = markdown.lines().last().unwrap_or_default();
    assert!(note.contains("cursor"));
    assert!(note.contains("fe2cc560-036c-44cd-90e8-294d5a74cebc"));
}

#[test]
fn test_annotation_nesting_order() {
    let both = json!([run("x", json!({"bold": true, "italic": true}))]);
    assert_eq!(render_rich_text(&both), "***x***");

    let all = json!([run("x", json!({"bold": true, "italic": true, "strikethrough": true, "code": true}))]);
    assert_eq!(render_rich_text(&all), "~~***`x`***~~");

    let linked = json!([{"type": "text", "plain_text": "docs", "annotations": {"bold": true},
                         "href": "https://developers.notion.com"}]);
    assert_eq!(render_rich_text(&linked), "[**docs**](https://developers.notion.com)");
}

#[test]
fn test_script_tags_never_survive() {
    let hostile = "<script>alert('x')</script>";
    let title = json!([run(hostile, json!({}))]);
    let split = json!([
        run("<scr", json!({})),
        run("ipt>alert(1)</scr", json!({})),
        run("ipt>", json!({}))
    ]);
    let entities = [
        json!({"object": "block", "id": "b", "type": "paragraph", "paragraph": {"rich_text": split}}),
        json!({"object": "block", "id": "b", "type": "heading_1", "heading_1": {"rich_text": split}}),
        json!({"object": "comment", "id": "c", "rich_text": split}),
        json!({"object": "page", "id": "p", "properties": {"Name": {"type": "title", "title": title}}}),
        json!({"object": "database", "id": "d", "title": title, "properties": {}}),
        json!({"object": "block", "id": "b", "type": "paragraph", "paragraph": {"rich_text": title}}),
        json!({"object": "block", "id": "b", "type": "code",
               "code": {"rich_text": title, "language": "html"}}),
        json!({"object": "comment", "id": "c", "rich_text": title}),
        json!({"object": "user", "id": "u", "type": "person", "name": hostile}),
        json!({"object": "mystery", "payload": hostile}),
        json!({"object": "list", "results": [{"object": "block", "id": "b", "type": "quote",
                                              "quote": {"rich_text": title}}]}),
    ];
    for entity in &entities {
        let rendered = convert_to_markdown(entity);
        assert!(!rendered.to_lowercase().contains("<script"), "leaked in {}", rendered);
    }
}
