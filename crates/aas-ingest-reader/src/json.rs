//! Accessors over `serde_json::Value` used by both JSON readers.
//!
//! A missing key, `null`, and the empty string all read as absent.

use serde_json::Value;

/// Non-empty string at `key`.
#[must_use]
pub fn opt_str<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Scalar at `key` as its lexical form.
///
/// Strings are returned as-is; numbers and booleans are rendered, since
/// hand-written documents often carry `"value": 42` for a property.
/// An empty string is absent, like a missing key or `null`.
#[must_use]
pub fn opt_scalar(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(as_scalar)
}

/// Lexical form of a scalar value; see [`opt_scalar`].
#[must_use]
pub fn as_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Array at `key`, or an empty slice.
#[must_use]
pub fn opt_array<'a>(node: &'a Value, key: &str) -> &'a [Value] {
    node.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Boolean at `key`; the strings `"true"` and `"false"` are accepted.
#[must_use]
pub fn opt_bool(node: &Value, key: &str) -> Option<bool> {
    match node.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Object at `key`, if present and not null.
#[must_use]
pub fn opt_object<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|v| v.is_object())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_and_null_are_absent() {
        let node = json!({"a": "", "b": null, "c": "x"});
        assert_eq!(opt_str(&node, "a"), None);
        assert_eq!(opt_str(&node, "b"), None);
        assert_eq!(opt_str(&node, "c"), Some("x"));
        assert_eq!(opt_str(&node, "d"), None);
    }

    #[test]
    fn scalars_are_rendered() {
        let node = json!({"n": 42, "f": 1.5, "b": true, "o": {}});
        assert_eq!(opt_scalar(&node, "n").as_deref(), Some("42"));
        assert_eq!(opt_scalar(&node, "f").as_deref(), Some("1.5"));
        assert_eq!(opt_scalar(&node, "b").as_deref(), Some("true"));
        assert_eq!(opt_scalar(&node, "o"), None);
        assert_eq!(opt_scalar(&json!({"v": ""}), "v"), None);
    }

    #[test]
    fn missing_array_is_empty() {
        let node = json!({"xs": [1, 2], "n": null});
        assert_eq!(opt_array(&node, "xs").len(), 2);
        assert!(opt_array(&node, "n").is_empty());
        assert!(opt_array(&node, "missing").is_empty());
    }

    #[test]
    fn booleans_accept_strings() {
        let node = json!({"a": true, "b": "False", "c": "maybe"});
        assert_eq!(opt_bool(&node, "a"), Some(true));
        assert_eq!(opt_bool(&node, "b"), Some(false));
        assert_eq!(opt_bool(&node, "c"), None);
    }
}
