//! Structural deep merge of schema nodes.
//!
//! Objects merge key by key and arrays merge index by index, both
//! recursively. Overlay array elements past the end of the base are
//! appended. Any other overlay value replaces what was there.

use serde_json::Value;

/// Merge `overlay` into `base`; overlay wins on conflicts.
pub fn merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(overlay)) => {
            for (position, value) in overlay.iter().enumerate() {
                match base.get_mut(position) {
                    Some(existing) => merge(existing, value),
                    None => base.push(value.clone()),
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Merge nodes left to right into a fresh object.
pub fn merged<'a>(nodes: impl IntoIterator<Item = &'a Value>) -> Value {
    let mut result = Value::Object(Default::default());
    for node in nodes {
        merge(&mut result, node);
    }
    result
}

/// Clone a node with one keyword removed.
pub fn without_keyword(node: &Value, keyword: &str) -> Value {
    let mut node = node.clone();
    if let Value::Object(map) = &mut node {
        map.shift_remove(keyword);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_wins() {
        let mut base = json!({ "type": "integer", "minimum": 0, "maximum": 10 });
        merge(&mut base, &json!({ "maximum": 5 }));
        assert_eq!(base, json!({ "type": "integer", "minimum": 0, "maximum": 5 }));
    }

    #[test]
    fn test_nested_objects_merge() {
        let mut base = json!({
            "type": "object",
            "properties": { "a": { "type": "string" } }
        });
        merge(
            &mut base,
            &json!({ "properties": { "b": { "type": "integer" } } }),
        );
        assert_eq!(
            base,
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "string" },
                    "b": { "type": "integer" }
                }
            })
        );
    }

    #[test]
    fn test_arrays_merge_by_index() {
        let mut base = json!({ "enum": [1, 2, 3] });
        merge(&mut base, &json!({ "enum": [4] }));
        assert_eq!(base, json!({ "enum": [4, 2, 3] }));

        let mut base = json!({ "enum": ["a"] });
        merge(&mut base, &json!({ "enum": ["b", "c"] }));
        assert_eq!(base, json!({ "enum": ["b", "c"] }));
    }

    #[test]
    fn test_tuple_items_merge_per_position() {
        let mut base = json!({ "items": [{ "type": "string" }, { "type": "integer" }] });
        merge(&mut base, &json!({ "items": [{ "maxLength": 3 }] }));
        assert_eq!(
            base,
            json!({ "items": [{ "type": "string", "maxLength": 3 }, { "type": "integer" }] })
        );
    }

    #[test]
    fn test_array_and_non_array_replace() {
        let mut base = json!({ "type": ["string", "null"] });
        merge(&mut base, &json!({ "type": "integer" }));
        assert_eq!(base, json!({ "type": "integer" }));
    }

    #[test]
    fn test_merged_left_to_right() {
        let parts = [
            json!({ "type": "string", "minLength": 1 }),
            json!({ "minLength": 3 }),
            json!({ "maxLength": 5 }),
        ];
        assert_eq!(
            merged(&parts),
            json!({ "type": "string", "minLength": 3, "maxLength": 5 })
        );
    }

    #[test]
    fn test_without_keyword_keeps_order() {
        let node = json!({ "a": 1, "anyOf": [], "b": 2 });
        let stripped = without_keyword(&node, "anyOf");
        let keys: Vec<_> = stripped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
