// src/model/json.rs
//! Defensive field access over untyped API documents.
//!
//! Every accessor is total: a missing key, a `null`, or a value of the wrong
//! JSON type all read as "absent" and the caller picks the default.

use serde_json::Value;

static EMPTY: Vec<Value> = Vec::new();

/// Presence-checked reads on a JSON value.
pub trait JsonExt {
    /// The field under `key`, unless it is absent or `null`.
    fn field(&self, key: &str) -> Option<&Value>;

    /// The string under `key`.
    fn str_field(&self, key: &str) -> Option<&str>;

    /// The string under `key`, treating `""` as absent.
    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.str_field(key).filter(|s| !s.is_empty())
    }

    /// The boolean under `key`; anything else reads as `false`.
    fn flag(&self, key: &str) -> bool;

    /// The array under `key`, or an empty slice.
    fn array_field(&self, key: &str) -> &[Value];

    /// Follows a chain of object keys, returning the string at the end.
    fn str_at(&self, path: &[&str]) -> Option<&str>;
}

impl JsonExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn array_field(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY.as_slice())
    }

    fn str_at(&self, path: &[&str]) -> Option<&str> {
        let mut current = self;
        for key in path {
            current = current.get(*key)?;
        }
        current.as_str()
    }
}
