// src/formatting/properties/schema.rs
//! Describes database schema columns for the "Details" cell.

use super::formatters::format_multi_select;
use crate::formatting::sanitize::sanitize;
use crate::model::{JsonExt, PropertyType};
use serde_json::Value;

/// Produces the details text for one database property schema entry.
pub fn describe_schema(schema: &Value) -> String {
    let Some(tag) = schema.str_field("type") else {
        return String::new();
    };
    let property_type = PropertyType::from_tag(tag);
    let config = schema.get(tag).unwrap_or(&Value::Null);

    match property_type {
        PropertyType::Select | PropertyType::MultiSelect | PropertyType::Status => {
            describe_options(config)
        }
        PropertyType::Relation => config
            .non_empty_str("database_id")
            .map(|id| format!("Related to: `{}`", sanitize(id)))
            .unwrap_or_default(),
        PropertyType::Formula => config
            .non_empty_str("expression")
            .map(|expr| format!("Formula: `{}`", sanitize(expr)))
            .unwrap_or_default(),
        PropertyType::Rollup => config
            .non_empty_str("function")
            .map(|function| format!("Function: {}", sanitize(function)))
            .unwrap_or_default(),
        PropertyType::Number => config
            .non_empty_str("format")
            .map(|format| format!("Format: {}", sanitize(format)))
            .unwrap_or_default(),
        PropertyType::Title => "Primary title column".to_string(),
        PropertyType::CreatedTime
        | PropertyType::LastEditedTime
        | PropertyType::CreatedBy
        | PropertyType::LastEditedBy => "Set automatically".to_string(),
        PropertyType::UniqueId => match config.non_empty_str("prefix") {
            Some(prefix) => format!("Auto-incrementing ID (prefix {})", sanitize(prefix)),
            None => "Auto-incrementing ID".to_string(),
        },
        _ => String::new(),
    }
}

fn describe_options(config: &Value) -> String {
    let names = format_multi_select(config.get("options").unwrap_or(&Value::Null));
    if names.is_empty() {
        String::new()
    } else {
        format!("Options: {}", names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multi_select_options() {
        let schema = json!({
            "id": "flsb",
            "name": "Tags",
            "type": "multi_select",
            "multi_select": {"options": [
                {"id": "1", "name": "A", "color": "blue"},
                {"id": "2", "name": "B", "color": "red"}
            ]}
        });
        assert_eq!(describe_schema(&schema), "Options: A, B");
    }

    #[test]
    fn test_relation_formula_rollup_details() {
        let relation = json!({"type": "relation", "relation": {"database_id": "668d797c-76fa-4934-9b05-ad288df2d136"}});
        assert_eq!(
            describe_schema(&relation),
            "Related to: `668d797c-76fa-4934-9b05-ad288df2d136`"
        );

        let formula = json!({"type": "formula", "formula": {"expression": "prop(\"Price\") * 2"}});
        assert_eq!(describe_schema(&formula), "Formula: `prop(\"Price\") * 2`");

        let rollup = json!({"type": "rollup", "rollup": {"function": "sum"}});
        assert_eq!(describe_schema(&rollup), "Function: sum");
    }

    #[test]
    fn test_fixed_labels_and_blanks() {
        assert_eq!(
            describe_schema(&json!({"type": "title", "title": {}})),
            "Primary title column"
        );
        assert_eq!(
            describe_schema(&json!({"type": "created_by", "created_by": {}})),
            "Set automatically"
        );
        assert_eq!(describe_schema(&json!({"type": "checkbox", "checkbox": {}})), "");
        assert_eq!(describe_schema(&json!({"type": "select", "select": {"options": []}})), "");
        assert_eq!(describe_schema(&json!({"type": "mystery"})), "");
        assert_eq!(describe_schema(&json!({})), "");
    }

    #[test]
    fn test_option_helper_reads_name() {
        use super::super::formatters::format_option;
        assert_eq!(format_option(&json!({"name": "Done"})), "Done");
    }
}
