//! RFC 7396 JSON Merge Patch.

use crate::value::{Map, Value};

/// Applies an RFC 7396 merge patch to `target`, producing a new tree.
///
/// A non-object `patch` replaces the target wholesale. Otherwise the result
/// starts from `target` (or an empty object when `target` is not one), `null`
/// patch members delete keys, and everything else merges recursively.
/// Merge-patch is total: every combination of inputs produces a value.
///
/// # Examples
///
/// ```
/// use jsontap::{merge_patch, parse};
///
/// let target = parse(r#"{"a": "b", "c": {"d": "e", "f": "g"}}"#).unwrap();
/// let patch = parse(r#"{"a": "z", "c": {"f": null}}"#).unwrap();
/// let merged = merge_patch(&target, &patch);
/// assert_eq!(merged, parse(r#"{"a": "z", "c": {"d": "e"}}"#).unwrap());
/// ```
#[must_use]
pub fn merge_patch(target: &Value, patch: &Value) -> Value {
    let Value::Object(patch_map) = patch else {
        return patch.clone();
    };
    let mut result = match target {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    for (key, patch_value) in patch_map {
        if patch_value.is_null() {
            result.shift_remove(key);
        } else {
            let merged = merge_patch(result.get(key).unwrap_or(&Value::Null), patch_value);
            result.insert(key.clone(), merged);
        }
    }
    Value::Object(result)
}
