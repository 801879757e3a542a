//! Recursive JSON value merging for configuration overrides.

use serde_json::Value;

/// Merge `update` into `target`, last write wins.
///
/// Objects merge key-by-key recursively. Arrays and scalars replace the
/// target wholesale, so an override fragment can clear a list by supplying
/// an empty one.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
