//! Permissive field extraction from loosely typed upstream JSON
//!
//! Upstream payloads are decoded into [`serde_json::Value`] first and read
//! through these helpers. A key that is absent, null or of the wrong type
//! yields the default (empty text or an empty list) instead of an error.

use serde_json::Value;

/// Walk a path of object keys, returning `None` as soon as a level is missing
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Text at `key`, or empty text
pub fn str_field(value: &Value, key: &str) -> String {
    nested_str_field(value, &[key])
}

/// Text at a nested path such as `["headline", "main"]`, or empty text
pub fn nested_str_field(value: &Value, path: &[&str]) -> String {
    lookup(value, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// List at `key`, or an empty slice
pub fn list_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    nested_list_field(value, &[key])
}

/// List at a nested path such as `["response", "docs"]`, or an empty slice
pub fn nested_list_field<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
