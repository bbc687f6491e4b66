//! Default configuration values.
//!
//! Normalized output is the defaults table with every explicitly handled
//! option laid over it; keys the dispatch never touched keep these values.

use serde_json::{Map, Value, json};

/// Transform pattern used when the default compiler is installed implicitly.
pub const DEFAULT_JS_PATTERN: &str = "^.+\\.jsx?$";

/// Module name of the default compiler.
pub const DEFAULT_COMPILER: &str = "babel-jest";

/// Runtime support module injected ahead of setup files for the default compiler.
pub const RUNTIME_SETUP_MODULE: &str = "regenerator-runtime/runtime";

pub const DEFAULT_TEST_ENVIRONMENT: &str = "jsdom";

/// Alias accepted for the built-in test runner.
pub const DEFAULT_TEST_RUNNER: &str = "jasmine2";

/// Module the built-in test runner alias resolves to.
pub const DEFAULT_TEST_RUNNER_MODULE: &str = "jest-jasmine2";

/// Runner used when none is configured; left symbolic in the output.
pub const DEFAULT_RUNNER: &str = "jest-runner";

/// Reporter names kept verbatim instead of being module-resolved.
pub const BUILTIN_REPORTERS: &[&str] = &["default", "summary", "github-actions"];

/// Extension every module file extension list must include.
pub const REQUIRED_MODULE_EXTENSION: &str = "js";

/// Coverage reporter dropped when machine-readable output is requested.
pub const TEXT_COVERAGE_REPORTER: &str = "text";

/// Default cache directory under the system temp dir.
pub fn cache_directory() -> String {
    std::env::temp_dir()
        .join("jest_rs")
        .to_string_lossy()
        .replace('\\', "/")
}

/// Whether a `CI` environment value means a CI run. `false`, `0` and the
/// empty string opt out.
pub fn is_ci(value: Option<&str>) -> bool {
    value.is_some_and(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "false" | "0"))
}

/// The default configuration table.
pub fn default_config() -> Map<String, Value> {
    let defaults = json!({
        "automock": false,
        "bail": 0,
        "browser": false,
        "cache": true,
        "cacheDirectory": cache_directory(),
        "changedFilesWithAncestor": false,
        "ci": is_ci(std::env::var("CI").ok().as_deref()),
        "clearMocks": false,
        "collectCoverage": false,
        "coveragePathIgnorePatterns": ["/node_modules/"],
        "coverageReporters": ["json", "text", "lcov", "clover"],
        "detectLeaks": false,
        "detectOpenHandles": false,
        "errorOnDeprecated": false,
        "expand": false,
        "extraGlobals": [],
        "forceCoverageMatch": [],
        "globals": {},
        "haste": {},
        "maxConcurrency": 5,
        "moduleDirectories": ["node_modules"],
        "moduleFileExtensions": ["js", "json", "jsx", "ts", "tsx", "node"],
        "moduleNameMapper": [],
        "modulePathIgnorePatterns": [],
        "noStackTrace": false,
        "notify": false,
        "notifyMode": "failure-change",
        "prettierPath": null,
        "resetMocks": false,
        "resetModules": false,
        "restoreMocks": false,
        "runTestsByPath": false,
        "runner": DEFAULT_RUNNER,
        "setupFiles": [],
        "setupFilesAfterEnv": [],
        "skipFilter": false,
        "snapshotSerializers": [],
        "testEnvironmentOptions": {},
        "testFailureExitCode": 1,
        "testLocationInResults": false,
        "testMatch": ["**/__tests__/**/*.[jt]s?(x)", "**/?(*.)+(spec|test).[jt]s?(x)"],
        "testPathIgnorePatterns": ["/node_modules/"],
        "testRegex": [],
        "testURL": "http://localhost",
        "timers": "real",
        "transform": [],
        "transformIgnorePatterns": ["/node_modules/"],
        "useStderr": false,
        "watch": false,
        "watchAll": false,
        "watchPathIgnorePatterns": [],
        "watchPlugins": [],
        "watchman": true,
    });

    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionRegistry;
    use rstest::rstest;

    #[test]
    fn defaults_only_use_known_keys() {
        let registry = OptionRegistry::with_builtins();
        for key in default_config().keys() {
            assert!(registry.is_known(key), "unknown default {key}");
        }
    }

    #[test]
    fn default_extensions_include_required_one() {
        let defaults = default_config();
        let extensions = defaults["moduleFileExtensions"].as_array().unwrap();
        assert!(extensions.contains(&json!(REQUIRED_MODULE_EXTENSION)));
    }

    #[test]
    fn default_test_match_is_non_empty_and_regex_empty() {
        let defaults = default_config();
        assert!(!defaults["testMatch"].as_array().unwrap().is_empty());
        assert!(defaults["testRegex"].as_array().unwrap().is_empty());
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), false)]
    #[case(Some("false"), false)]
    #[case(Some("FALSE"), false)]
    #[case(Some("0"), false)]
    #[case(Some("true"), true)]
    #[case(Some("1"), true)]
    #[case(Some("github"), true)]
    fn ci_reads_the_variable_value(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_ci(value), expected);
    }
}
