// src/formatting/people.rs
//! Users and comments.

use super::pages::entity_id;
use super::rich_text::render_rich_text;
use super::sanitize::sanitize;
use crate::error::AppError;
use crate::model::JsonExt;
use serde_json::Value;
use std::fmt::Write;

/// `👤 **Name** (type)` followed by email (people only) and ID lines.
pub fn compose_user_markdown(user: &Value) -> Result<String, AppError> {
    let mut out = String::new();
    let name = user
        .non_empty_str("name")
        .map(sanitize)
        .unwrap_or_else(|| "Unknown user".to_string());

    match user.non_empty_str("type") {
        Some(kind) => writeln!(out, "👤 **{}** ({})", name, sanitize(kind))?,
        None => writeln!(out, "👤 **{}**", name)?,
    }

    if let Some(email) = user.str_at(&["person", "email"]).filter(|e| !e.is_empty()) {
        writeln!(out, "Email: {}", sanitize(email))?;
    }
    if let Some(workspace) = user
        .str_at(&["bot", "workspace_name"])
        .filter(|w| !w.is_empty())
    {
        writeln!(out, "Workspace: {}", sanitize(workspace))?;
    }
    writeln!(out, "ID: `{}`", entity_id(user))?;
    Ok(out)
}

/// `💬 text` followed by a line with creation time and discussion.
pub fn compose_comment_markdown(comment: &Value) -> Result<String, AppError> {
    let mut out = String::new();
    let text = render_rich_text(comment.get("rich_text").unwrap_or(&Value::Null));
    writeln!(out, "💬 {}", text)?;

    let created = comment.non_empty_str("created_time").map(sanitize);
    let discussion = comment.non_empty_str("discussion_id").map(sanitize);
    match (created, discussion) {
        (Some(created), Some(discussion)) => writeln!(
            out,
            "_Created {} in discussion `{}`_",
            created, discussion
        )?,
        (Some(created), None) => writeln!(out, "_Created {}_", created)?,
        (None, Some(discussion)) => writeln!(out, "_In discussion `{}`_", discussion)?,
        (None, None) => {}
    }
    Ok(out)
}
