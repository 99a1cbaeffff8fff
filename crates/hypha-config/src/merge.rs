//! Recursive merge of JSON documents.
//!
//! Used by the options resolver and by the boot-time config merge step. The
//! overlay wins on key collisions while untouched nested siblings in the
//! target are preserved.

use serde_json::Value;

/// Merges `overlay` into `target` in place.
///
/// Two objects merge key by key, recursing into shared keys. Any other
/// pairing replaces the target with a clone of the overlay.
pub fn deep_merge(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, incoming_value) in incoming {
                match existing.get_mut(key) {
                    Some(existing_value) => deep_merge(existing_value, incoming_value),
                    None => {
                        existing.insert(key.clone(), incoming_value.clone());
                    }
                }
            }
        }
        (slot, incoming) => *slot = incoming.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::deep_merge;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!({"a": {"b": 1, "c": 3}}), json!({"a": {"b": 2}}), json!({"a": {"b": 2, "c": 3}}))]
    #[case(json!({"a": 1}), json!({"b": 2}), json!({"a": 1, "b": 2}))]
    #[case(json!({"a": {"b": 1}}), json!({"a": "flat"}), json!({"a": "flat"}))]
    #[case(json!("scalar"), json!({"a": 1}), json!({"a": 1}))]
    #[case(json!({"a": [1, 2]}), json!({"a": [3]}), json!({"a": [3]}))]
    fn merges_overlay_over_target(
        #[case] mut target: Value,
        #[case] overlay: Value,
        #[case] expected: Value,
    ) {
        deep_merge(&mut target, &overlay);
        assert_eq!(target, expected);
    }

    #[rstest]
    fn preserves_untouched_nested_defaults() {
        let mut target = json!({
            "Addresses": {"Swarm": ["/ip4/0.0.0.0/tcp/4002"], "API": "/ip4/127.0.0.1/tcp/5002"},
            "Bootstrap": []
        });
        let overlay = json!({"Addresses": {"API": "/ip4/127.0.0.1/tcp/6000"}});
        deep_merge(&mut target, &overlay);
        assert_eq!(
            target,
            json!({
                "Addresses": {
                    "Swarm": ["/ip4/0.0.0.0/tcp/4002"],
                    "API": "/ip4/127.0.0.1/tcp/6000"
                },
                "Bootstrap": []
            })
        );
    }
}
