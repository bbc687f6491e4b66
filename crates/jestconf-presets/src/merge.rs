//! Merging preset options beneath user options.
//!
//! Plain keys follow `{...preset, ...options}`: the user's value wins
//! whenever both sides set a key. A handful of keys merge instead:
//!
//! - `setupFiles`, `setupFilesAfterEnv`: preset entries run first, user
//!   entries are appended.
//! - `modulePathIgnorePatterns`: preset entries are prepended when both
//!   sides set the key.
//! - `moduleNameMapper`, `transform`: ordered tables keep the preset's keys
//!   in the preset's order; user values replace preset values on duplicate
//!   keys and user-only keys follow.

use serde_json::{Map, Value};

const CONCATENATED_LISTS: &[&str] = &["setupFiles", "setupFilesAfterEnv"];
const PREPENDED_LISTS: &[&str] = &["modulePathIgnorePatterns"];
const ORDERED_TABLES: &[&str] = &["moduleNameMapper", "transform"];

/// Merge `preset` beneath `options`.
pub fn merge_with_preset(mut options: Map<String, Value>, preset: Map<String, Value>) -> Map<String, Value> {
    for &key in CONCATENATED_LISTS {
        let user = options.get(key).and_then(Value::as_array);
        let from_preset = preset.get(key).and_then(Value::as_array);
        if user.is_none() && from_preset.is_none() {
            continue;
        }
        let merged: Vec<Value> = from_preset
            .into_iter()
            .flatten()
            .chain(user.into_iter().flatten())
            .cloned()
            .collect();
        options.insert(key.to_string(), Value::Array(merged));
    }

    for &key in PREPENDED_LISTS {
        if let (Some(Value::Array(user)), Some(Value::Array(from_preset))) =
            (options.get(key), preset.get(key))
        {
            let merged: Vec<Value> = from_preset.iter().chain(user.iter()).cloned().collect();
            options.insert(key.to_string(), Value::Array(merged));
        }
    }

    for &key in ORDERED_TABLES {
        if let (Some(Value::Object(user)), Some(Value::Object(from_preset))) =
            (options.get(key), preset.get(key))
        {
            let mut merged = from_preset.clone();
            for (pattern, target) in user {
                merged.insert(pattern.clone(), target.clone());
            }
            options.insert(key.to_string(), Value::Object(merged));
        }
    }

    let mut result = preset;
    for (key, value) in options {
        result.insert(key, value);
    }
    result
}
