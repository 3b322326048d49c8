//! Synonym probing for the ancestry fields of a raw dictionary node.
//!
//! The published dictionary is not consistent about how it names links
//! between nodes. Each kind of link has an ordered list of candidate field
//! names; the first one carrying a usable value wins.

use serde_json::Value;

/// Field names holding a single ancestor code, in priority order.
pub const PARENT_FIELDS: &[&str] = &["parent", "parentCode"];

/// Field names holding descendant codes, in priority order.
pub const CHILD_FIELDS: &[&str] = &["children", "child", "childCode", "childCodes"];

/// Read the direct parent code of a node, if it declares one.
pub fn parent_code(node: &Value) -> Option<String> {
    PARENT_FIELDS
        .iter()
        .find_map(|field| node.get(field).and_then(code_text))
}

/// Read the child codes of a node from the first present child field.
///
/// A single code stored where a list is expected is treated as a
/// one-element list. Returns an empty vector when no child field is present.
pub fn child_codes(node: &Value) -> Vec<String> {
    for field in CHILD_FIELDS {
        match node.get(field) {
            Some(Value::Array(items)) => return items.iter().filter_map(code_text).collect(),
            Some(other) => {
                if let Some(code) = code_text(other) {
                    return vec![code];
                }
            }
            None => {}
        }
    }
    Vec::new()
}

/// Read the display name of a node, defaulting to the empty string.
pub fn name(node: &Value) -> String {
    node.get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Interpret a JSON value as an area code.
///
/// Non-empty strings are used as-is; numbers are rendered as decimal text.
fn code_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
