//! Deep merge of JSON documents.
//!
//! Objects are merged key by key and arrays element by element, recursively.
//! Wherever both sides hold a scalar, or the shapes differ, the override wins.

use serde_json::Value;

/// Capability to layer an override document on top of a base document.
pub trait Merger: Send + Sync {
    fn merge(&self, base: &Value, overlay: &Value) -> Value;
}

/// Default recursive merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepMerge;

impl Merger for DeepMerge {
    fn merge(&self, base: &Value, overlay: &Value) -> Value {
        let mut merged = base.clone();
        merge_into(&mut merged, overlay);
        merged
    }
}

/// Recursively merge `overlay` into `target` in place.
pub fn merge_into(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match target_map.get_mut(key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(overlay_items)) => {
            for (i, value) in overlay_items.iter().enumerate() {
                match target_items.get_mut(i) {
                    Some(existing) => merge_into(existing, value),
                    None => target_items.push(value.clone()),
                }
            }
        }
        (target, overlay) => *target = overlay.clone(),
    }
}
