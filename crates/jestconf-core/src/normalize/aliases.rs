//! Deprecated-option aliasing.
//!
//! Walks the ordered alias triples and rewrites each legacy key onto its
//! replacement. Conflicts between a legacy key and its replacement are
//! rejected beforehand by [`super::invariants::check_legacy_pairs`].

use jestconf_meta::{Conflict, DEPRECATED_OPTIONS};
use serde_json::{Map, Value};

/// Deprecation messages for the legacy keys present in `options`.
pub(crate) fn legacy_messages(options: &Map<String, Value>) -> Vec<String> {
    DEPRECATED_OPTIONS
        .iter()
        .filter(|alias| options.contains_key(alias.legacy))
        .map(|alias| alias.message.to_string())
        .collect()
}

/// Rewrite legacy keys onto their replacements.
pub(crate) fn apply(mut options: Map<String, Value>) -> Map<String, Value> {
    for alias in DEPRECATED_OPTIONS {
        let Some(legacy) = options.remove(alias.legacy) else {
            continue;
        };

        let Some(replacement) = alias.replacement else {
            tracing::debug!(option = alias.legacy, "Dropping removed option");
            continue;
        };

        let replacement_set = options
            .get(replacement)
            .is_some_and(|value| !value.is_null());
        if replacement_set && alias.conflict == Conflict::ReplacementWins {
            tracing::debug!(option = alias.legacy, %replacement, "Replacement already set; ignoring legacy value");
            continue;
        }

        tracing::debug!(option = alias.legacy, %replacement, "Translating legacy option");
        options.insert(replacement.to_string(), (alias.translate)(&legacy));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn legacy_keys_are_translated_and_removed() {
        let options = apply(map(json!({
            "scriptPreprocessor": "./pre.js",
            "preprocessorIgnorePatterns": ["/vendor/"],
            "setupTestFrameworkScriptFile": "./setup.js",
            "testPathDirs": ["<rootDir>/src"],
            "mapCoverage": true
        })));
        assert_eq!(
            options,
            map(json!({
                "transform": {".*": "./pre.js"},
                "transformIgnorePatterns": ["/vendor/"],
                "setupFilesAfterEnv": ["./setup.js"],
                "roots": ["<rootDir>/src"]
            }))
        );
    }

    #[test]
    fn explicit_roots_win_over_test_path_dirs() {
        let options = apply(map(json!({
            "testPathDirs": ["<rootDir>/old"],
            "roots": ["<rootDir>/new"]
        })));
        assert_eq!(options, map(json!({"roots": ["<rootDir>/new"]})));
    }

    #[test]
    fn legacy_messages_name_each_present_key() {
        let messages = legacy_messages(&map(json!({
            "setupTestFrameworkScriptFile": "./s.js",
            "verbose": true
        })));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("setupTestFrameworkScriptFile"));
        assert!(legacy_messages(&map(json!({"verbose": true}))).is_empty());
    }
}
