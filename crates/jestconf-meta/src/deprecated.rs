//! Deprecated option aliases.
//!
//! Each alias is an `(old key, new key, translation)` triple applied in
//! order before dispatch. The translation turns the legacy value into the
//! shape the replacement option expects.

use serde_json::{Map, Value, json};

/// What happens when both the legacy option and its replacement are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Setting both is a configuration error.
    Exclusive,
    /// The replacement is kept and the legacy value discarded.
    ReplacementWins,
}

/// A deprecated option and how it maps onto its replacement.
#[derive(Debug, Clone, Copy)]
pub struct Alias {
    pub legacy: &'static str,
    /// `None` when the option was removed outright.
    pub replacement: Option<&'static str>,
    pub conflict: Conflict,
    pub translate: fn(&Value) -> Value,
    pub message: &'static str,
}

fn identity(value: &Value) -> Value {
    value.clone()
}

fn wrap_in_catch_all_transform(value: &Value) -> Value {
    let mut table = Map::new();
    table.insert(".*".to_string(), value.clone());
    Value::Object(table)
}

fn wrap_in_list(value: &Value) -> Value {
    json!([value])
}

/// Deprecated options, in application order.
pub const DEPRECATED_OPTIONS: &[Alias] = &[
    Alias {
        legacy: "scriptPreprocessor",
        replacement: Some("transform"),
        conflict: Conflict::Exclusive,
        translate: wrap_in_catch_all_transform,
        message: "Option \"scriptPreprocessor\" was replaced by \"transform\", which supports multiple preprocessors.",
    },
    Alias {
        legacy: "preprocessorIgnorePatterns",
        replacement: Some("transformIgnorePatterns"),
        conflict: Conflict::Exclusive,
        translate: identity,
        message: "Option \"preprocessorIgnorePatterns\" was replaced by \"transformIgnorePatterns\", which support multiple preprocessors.",
    },
    Alias {
        legacy: "setupTestFrameworkScriptFile",
        replacement: Some("setupFilesAfterEnv"),
        conflict: Conflict::Exclusive,
        translate: wrap_in_list,
        message: "Option \"setupTestFrameworkScriptFile\" was replaced by configuration \"setupFilesAfterEnv\", which supports multiple paths.",
    },
    Alias {
        legacy: "testPathDirs",
        replacement: Some("roots"),
        conflict: Conflict::ReplacementWins,
        translate: identity,
        message: "Option \"testPathDirs\" was replaced by \"roots\".",
    },
    Alias {
        legacy: "mapCoverage",
        replacement: None,
        conflict: Conflict::ReplacementWins,
        translate: identity,
        message: "Option \"mapCoverage\" has been removed, as it's no longer necessary.",
    },
];

/// Look up the alias entry for a legacy key.
pub fn alias_for(key: &str) -> Option<&'static Alias> {
    DEPRECATED_OPTIONS.iter().find(|alias| alias.legacy == key)
}
