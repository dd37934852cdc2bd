// src/formatting/properties/mod.rs
//! Property formatting for Notion page values and database schemas.
//!
//! Dispatch happens on the property's `type` tag; the payload lives under a
//! key with the same name. Unrecognized types render as an explicit marker.

mod formatters;
mod schema;

pub use schema::describe_schema;

use crate::constants::UNSUPPORTED_PROPERTY_MARKER;
use crate::model::{JsonExt, PropertyType};
use formatters::*;
use serde_json::Value;

// --- Public API ---

/// Renders a page property value to its display string.
pub fn render_property_value(value: &Value) -> String {
    let Some(tag) = value.str_field("type") else {
        return UNSUPPORTED_PROPERTY_MARKER.to_string();
    };
    let payload = value.get(tag).unwrap_or(&Value::Null);

    log::trace!("Formatting property {:?} of type {}", value.str_field("id"), tag);

    match PropertyType::from_tag(tag) {
        PropertyType::Title | PropertyType::RichText => format_text(payload),
        PropertyType::Number => format_number(payload),
        PropertyType::Select | PropertyType::Status => format_option(payload),
        PropertyType::MultiSelect => format_multi_select(payload),
        PropertyType::Date => format_date(payload),
        PropertyType::People => format_people(payload),
        PropertyType::Files => format_files(payload),
        PropertyType::Checkbox => format_checkbox(payload),
        PropertyType::Url
        | PropertyType::Email
        | PropertyType::PhoneNumber
        | PropertyType::CreatedTime
        | PropertyType::LastEditedTime => format_plain(payload),
        PropertyType::Formula => format_formula(payload),
        PropertyType::Relation => format_relation(payload),
        PropertyType::Rollup => format_rollup(payload),
        PropertyType::CreatedBy | PropertyType::LastEditedBy => format_user(payload),
        PropertyType::UniqueId => format_unique_id(payload),
        PropertyType::Verification => format_verification(payload),
        PropertyType::Unknown(other) => {
            log::debug!("Unsupported property type: {}", other);
            UNSUPPORTED_PROPERTY_MARKER.to_string()
        }
    }
}

/// Whether a property value is the page's title.
pub fn is_title(value: &Value) -> bool {
    value.str_field("type") == Some(PropertyType::Title.as_str())
}
