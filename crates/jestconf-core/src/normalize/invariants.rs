//! Cross-option invariants.
//!
//! Rules that involve more than one option and so cannot live in the
//! per-key dispatch table. Hard violations abort normalization; the rest
//! coerce one option to fit another.

use super::matcher::PatternMatcher;
use crate::argv::{Argv, is_truthy};
use crate::{Error, Result};
use jestconf_fs::NormalizedPath;
use jestconf_fs::tokens::replace_root_dir_in_path;
use jestconf_meta::{Conflict, DEPRECATED_OPTIONS};
use serde_json::{Map, Value};

/// Reject legacy options set alongside the option that replaced them.
///
/// An empty replacement list does not count as set, so
/// `setupTestFrameworkScriptFile` may coexist with `setupFilesAfterEnv: []`.
pub(crate) fn check_legacy_pairs(options: &Map<String, Value>) -> Result<()> {
    for alias in DEPRECATED_OPTIONS {
        let Some(replacement) = alias.replacement else {
            continue;
        };
        if alias.conflict != Conflict::Exclusive || !options.contains_key(alias.legacy) {
            continue;
        }
        if options.get(replacement).is_some_and(is_set) {
            return Err(Error::exclusive(alias.legacy, replacement, Some(replacement)));
        }
    }
    Ok(())
}

/// `testMatch` and `testRegex` select tests two different ways; only one
/// may be in effect.
///
/// With only `testRegex` given, `testMatch` is forced empty so the default
/// match globs cannot apply on top of it.
pub(crate) fn enforce_test_selection(options: &mut Map<String, Value>) -> Result<()> {
    let has_regex = options.get("testRegex").is_some_and(is_set);
    let has_match = options.get("testMatch").is_some_and(is_set);

    if has_regex && has_match {
        return Err(Error::exclusive("testMatch", "testRegex", None));
    }
    if has_regex {
        options.insert("testMatch".into(), Value::Array(Vec::new()));
    }
    Ok(())
}

/// Limit coverage to the files handed to `--findRelatedTests`.
///
/// Related files are made relative to the root. If `collectCoverageFrom`
/// was given explicitly, its negations are kept and only related files it
/// already covers are added.
pub(crate) fn narrow_coverage_to_related(
    options: &mut Map<String, Value>,
    argv: &Argv,
    positional: &[String],
    root_dir: &NormalizedPath,
    matcher: &dyn PatternMatcher,
) {
    let collect_coverage = options.get("collectCoverage").is_some_and(is_truthy);
    if !collect_coverage || !argv.is_set("findRelatedTests") {
        return;
    }

    let related: Vec<String> = positional
        .iter()
        .map(|file| {
            let file = NormalizedPath::new(replace_root_dir_in_path(root_dir, file));
            if file.is_absolute() {
                file.relative_to(root_dir)
                    .unwrap_or_else(|| file.as_str().to_string())
            } else {
                file.as_str().to_string()
            }
        })
        .collect();

    let narrowed = match options.get("collectCoverageFrom").and_then(Value::as_array) {
        Some(existing) => {
            let patterns: Vec<&str> = existing.iter().filter_map(Value::as_str).collect();
            let (negations, positives): (Vec<&str>, Vec<&str>) =
                patterns.into_iter().partition(|p| p.starts_with('!'));

            let covered = related.into_iter().filter(|file| {
                positives.iter().any(|p| matcher.is_match(p, file))
                    && !negations.iter().any(|n| matcher.is_match(&n[1..], file))
            });

            negations
                .iter()
                .map(|n| n.to_string())
                .chain(covered)
                .collect::<Vec<_>>()
        }
        None => related,
    };

    tracing::debug!(files = narrowed.len(), "Narrowed coverage to related files");
    options.insert(
        "collectCoverageFrom".into(),
        Value::Array(narrowed.into_iter().map(Value::String).collect()),
    );
}

/// Present and not empty.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::matcher::GlobPatternMatcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn legacy_setup_file_with_empty_list_is_allowed() {
        let options = map(json!({
            "setupTestFrameworkScriptFile": "./s.js",
            "setupFilesAfterEnv": []
        }));
        assert!(check_legacy_pairs(&options).is_ok());
    }

    #[test]
    fn legacy_setup_file_with_list_is_rejected() {
        let options = map(json!({
            "setupTestFrameworkScriptFile": "./s.js",
            "setupFilesAfterEnv": ["./other.js"]
        }));
        let err = check_legacy_pairs(&options).unwrap_err();
        assert_eq!(err.options(), vec!["setupTestFrameworkScriptFile", "setupFilesAfterEnv"]);
    }

    #[test]
    fn regex_only_empties_test_match() {
        let mut options = map(json!({"testRegex": "spec\\.js$"}));
        enforce_test_selection(&mut options).unwrap();
        assert_eq!(options["testMatch"], json!([]));
    }

    #[test]
    fn match_and_regex_together_are_rejected() {
        let mut options = map(json!({"testRegex": ["x"], "testMatch": ["**/*.js"]}));
        let err = enforce_test_selection(&mut options).unwrap_err();
        assert_eq!(err.options(), vec!["testMatch", "testRegex"]);
    }

    #[test]
    fn related_files_replace_unscoped_coverage() {
        let root = NormalizedPath::new("/project");
        let mut options = map(json!({"collectCoverage": true}));
        let argv = Argv::new().with_flag("findRelatedTests", true);
        let files = vec!["/project/src/a.js".to_string(), "<rootDir>/src/b.js".to_string()];

        narrow_coverage_to_related(&mut options, &argv, &files, &root, &GlobPatternMatcher);

        assert_eq!(options["collectCoverageFrom"], json!(["src/a.js", "src/b.js"]));
    }

    #[test]
    fn explicit_scope_keeps_negations_and_intersection() {
        let root = NormalizedPath::new("/project");
        let mut options = map(json!({
            "collectCoverage": true,
            "collectCoverageFrom": ["src/**/*.js", "!src/vendor/**"]
        }));
        let argv = Argv::new().with_flag("findRelatedTests", true);
        let files = vec![
            "/project/src/a.js".to_string(),
            "/project/lib/b.js".to_string(),
            "/project/src/vendor/c.js".to_string(),
        ];

        narrow_coverage_to_related(&mut options, &argv, &files, &root, &GlobPatternMatcher);

        assert_eq!(
            options["collectCoverageFrom"],
            json!(["!src/vendor/**", "src/a.js"])
        );
    }

    #[test]
    fn coverage_off_leaves_scope_alone() {
        let root = NormalizedPath::new("/project");
        let mut options = map(json!({"collectCoverage": false}));
        let argv = Argv::new().with_flag("findRelatedTests", true);
        narrow_coverage_to_related(&mut options, &argv, &["a.js".into()], &root, &GlobPatternMatcher);
        assert!(!options.contains_key("collectCoverageFrom"));
    }
}
