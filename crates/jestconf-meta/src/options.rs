//! The option specification table.
//!
//! Each recognized option key maps to a [`Rule`] naming the generic
//! normalization handler that processes it, and to the [`Shape`]s its raw
//! value may take. Adding or removing an option is a change to [`OPTIONS`]
//! only.

use serde_json::Value;

/// How an absent-or-unresolvable module reference is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A given value that cannot be resolved is a configuration error.
    Required,
    /// A given value that cannot be resolved is recorded as unset.
    Optional,
}

/// Options whose normalization is bespoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structural {
    Bail,
    CollectCoverageFrom,
    CollectCoverageOnlyFrom,
    Haste,
    /// Integers that may arrive as numeric strings from the command line.
    Integer,
    ModuleFileExtensions,
    ModuleNameMapper,
    Projects,
    TestRegex,
    TestTimeout,
    Transform,
    WatchPlugins,
}

/// The normalization rule applied to one option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Copied verbatim.
    PassThrough,
    /// Token-substituted and resolved to an absolute path.
    Path,
    /// Each entry token-substituted and resolved to an absolute path.
    PathList,
    /// Resolved through the module resolver.
    Module(Presence),
    /// Each entry resolved through the module resolver, order preserved.
    ModuleList,
    /// `<rootDir>` spliced in, separators converted for the regex engine.
    RegexPatterns,
    /// Escaped `<rootDir>` spliced in, separators converted for the glob engine.
    GlobPatterns,
    Structural(Structural),
    /// Produced by a pipeline stage after dispatch; the raw value is ignored.
    Computed,
    /// A deprecated name translated away before dispatch.
    Legacy,
}

/// A JSON value shape accepted by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Any,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Shape {
    /// Whether `value` has this shape. `null` matches every shape.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Shape::Any, _) => true,
            (Shape::Bool, Value::Bool(_)) => true,
            (Shape::Number, Value::Number(_)) => true,
            (Shape::String, Value::String(_)) => true,
            (Shape::Array, Value::Array(_)) => true,
            (Shape::Object, Value::Object(_)) => true,
            _ => false,
        }
    }

    /// The shape of an actual value, for error messages.
    pub fn name_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Any => "any",
            Shape::Bool => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Array => "array",
            Shape::Object => "object",
        }
    }
}

/// One row of the option table.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub rule: Rule,
    pub shapes: &'static [Shape],
}

const fn spec(key: &'static str, rule: Rule, shapes: &'static [Shape]) -> OptionSpec {
    OptionSpec { key, rule, shapes }
}

use Presence::{Optional, Required};
use Rule::*;
use Shape::{Any, Array, Bool, Number, Object};

const BOOL: &[Shape] = &[Bool];
const STR: &[Shape] = &[Shape::String];
const ARR: &[Shape] = &[Array];
const OBJ: &[Shape] = &[Object];

/// Every option recognized by the normalizer.
pub const OPTIONS: &[OptionSpec] = &[
    spec("all", PassThrough, BOOL),
    spec("automock", PassThrough, BOOL),
    spec("bail", Structural(Structural::Bail), &[Bool, Number, Shape::String]),
    spec("browser", PassThrough, BOOL),
    spec("cache", PassThrough, BOOL),
    spec("cacheDirectory", Path, STR),
    spec("changedFilesWithAncestor", PassThrough, BOOL),
    spec("changedSince", PassThrough, STR),
    spec("ci", PassThrough, BOOL),
    spec("clearMocks", PassThrough, BOOL),
    spec("collectCoverage", PassThrough, BOOL),
    spec("collectCoverageFrom", Structural(Structural::CollectCoverageFrom), &[Array, Shape::String]),
    spec("collectCoverageOnlyFrom", Structural(Structural::CollectCoverageOnlyFrom), &[Object, Array]),
    spec("coverageDirectory", Path, STR),
    spec("coveragePathIgnorePatterns", RegexPatterns, ARR),
    spec("coverageReporters", PassThrough, ARR),
    spec("coverageThreshold", PassThrough, OBJ),
    spec("dependencyExtractor", Module(Required), STR),
    spec("detectLeaks", PassThrough, BOOL),
    spec("detectOpenHandles", PassThrough, BOOL),
    spec("displayName", PassThrough, &[Shape::String, Object]),
    spec("errorOnDeprecated", PassThrough, BOOL),
    spec("expand", PassThrough, BOOL),
    spec("extraGlobals", PassThrough, ARR),
    spec("filter", Module(Required), STR),
    spec("findRelatedTests", PassThrough, BOOL),
    spec("forceCoverageMatch", PassThrough, ARR),
    spec("forceExit", PassThrough, BOOL),
    spec("globalSetup", Module(Required), STR),
    spec("globalTeardown", Module(Required), STR),
    spec("globals", PassThrough, OBJ),
    spec("haste", Structural(Structural::Haste), OBJ),
    spec("json", PassThrough, BOOL),
    spec("lastCommit", PassThrough, BOOL),
    spec("listTests", PassThrough, BOOL),
    spec("logHeapUsage", PassThrough, BOOL),
    spec("maxConcurrency", Structural(Structural::Integer), &[Number, Shape::String]),
    spec("maxWorkers", PassThrough, &[Number, Shape::String]),
    spec("moduleDirectories", GlobPatterns, ARR),
    spec("moduleFileExtensions", Structural(Structural::ModuleFileExtensions), ARR),
    spec("moduleLoader", Module(Required), STR),
    spec("moduleNameMapper", Structural(Structural::ModuleNameMapper), OBJ),
    spec("modulePathIgnorePatterns", RegexPatterns, ARR),
    spec("modulePaths", PathList, ARR),
    spec("name", PassThrough, STR),
    spec("noStackTrace", PassThrough, BOOL),
    spec("nonFlagArgs", Computed, ARR),
    spec("notify", PassThrough, BOOL),
    spec("notifyMode", PassThrough, STR),
    spec("onlyChanged", PassThrough, BOOL),
    spec("outputFile", PassThrough, STR),
    spec("passWithNoTests", PassThrough, BOOL),
    spec("preset", PassThrough, STR),
    spec("prettierPath", Module(Optional), STR),
    spec("projects", Structural(Structural::Projects), ARR),
    spec("reporters", PassThrough, ARR),
    spec("resetMocks", PassThrough, BOOL),
    spec("resetModules", PassThrough, BOOL),
    spec("resolver", PassThrough, STR),
    spec("restoreMocks", PassThrough, BOOL),
    spec("rootDir", PassThrough, STR),
    spec("roots", PathList, ARR),
    spec("runInBand", PassThrough, BOOL),
    spec("runTestsByPath", PassThrough, BOOL),
    spec("runner", PassThrough, STR),
    spec("setupFiles", ModuleList, ARR),
    spec("setupFilesAfterEnv", ModuleList, ARR),
    spec("silent", PassThrough, BOOL),
    spec("skipFilter", PassThrough, BOOL),
    spec("skipNodeResolution", PassThrough, BOOL),
    spec("snapshotResolver", Module(Required), STR),
    spec("snapshotSerializers", ModuleList, ARR),
    spec("testEnvironment", PassThrough, STR),
    spec("testEnvironmentOptions", PassThrough, OBJ),
    spec("testFailureExitCode", Structural(Structural::Integer), &[Number, Shape::String]),
    spec("testLocationInResults", PassThrough, BOOL),
    spec("testMatch", GlobPatterns, ARR),
    spec("testNamePattern", PassThrough, STR),
    spec("testPathIgnorePatterns", RegexPatterns, ARR),
    spec("testPathPattern", Computed, &[Shape::String, Array]),
    spec("testRegex", Structural(Structural::TestRegex), &[Shape::String, Array]),
    spec("testResultsProcessor", Module(Required), STR),
    spec("testRunner", PassThrough, STR),
    spec("testSequencer", Module(Required), STR),
    spec("testTimeout", Structural(Structural::TestTimeout), &[Number]),
    spec("testURL", PassThrough, STR),
    spec("timers", PassThrough, STR),
    spec("transform", Structural(Structural::Transform), OBJ),
    spec("transformIgnorePatterns", RegexPatterns, ARR),
    spec("unmockedModulePathPatterns", RegexPatterns, ARR),
    spec("updateSnapshot", Computed, &[Bool, Shape::String]),
    spec("useStderr", PassThrough, BOOL),
    spec("verbose", PassThrough, BOOL),
    spec("watch", PassThrough, BOOL),
    spec("watchAll", PassThrough, BOOL),
    spec("watchPathIgnorePatterns", RegexPatterns, ARR),
    spec("watchPlugins", Structural(Structural::WatchPlugins), ARR),
    spec("watchman", PassThrough, BOOL),
    // Legacy names, translated before dispatch.
    spec("mapCoverage", Legacy, BOOL),
    spec("preprocessorIgnorePatterns", Legacy, ARR),
    spec("scriptPreprocessor", Legacy, STR),
    spec("setupTestFrameworkScriptFile", Legacy, STR),
    spec("testPathDirs", Legacy, ARR),
    spec("$schema", PassThrough, &[Any]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn option_keys_are_unique() {
        let mut seen = HashSet::new();
        for option in OPTIONS {
            assert!(seen.insert(option.key), "duplicate option {}", option.key);
        }
    }

    #[test]
    fn every_option_accepts_some_shape() {
        assert!(OPTIONS.iter().all(|o| !o.shapes.is_empty()));
    }

    #[test]
    fn null_matches_every_shape() {
        for shape in [Shape::Bool, Shape::Array, Shape::Object] {
            assert!(shape.matches(&Value::Null));
        }
    }

    #[test]
    fn shape_mismatch_is_detected() {
        assert!(!Shape::Array.matches(&json!("x")));
        assert!(Shape::Any.matches(&json!({"a": 1})));
        assert_eq!(Shape::name_of(&json!([1])), "array");
    }
}
