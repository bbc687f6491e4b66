//! Test path pattern assembly.

use regex::Regex;

/// The effective test path pattern and any warning raised building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPathPattern {
    pub pattern: String,
    pub warning: Option<String>,
}

/// Build the pattern for the current platform separator.
pub fn build_test_path_pattern(positional: &[String], flag: &[String]) -> TestPathPattern {
    build_test_path_pattern_with(positional, flag, std::path::MAIN_SEPARATOR)
}

/// Join positional arguments and `--testPathPattern` entries into one
/// alternation.
///
/// On platforms whose separator is not `/`, each `/` becomes an escaped
/// backslash. A joined pattern that does not compile is replaced by the
/// empty, match-all pattern and reported as a warning.
pub fn build_test_path_pattern_with(
    positional: &[String],
    flag: &[String],
    separator: char,
) -> TestPathPattern {
    let pattern = positional
        .iter()
        .chain(flag)
        .map(|entry| {
            if separator == '/' {
                entry.clone()
            } else {
                entry.replace('/', "\\\\")
            }
        })
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&pattern) {
        Ok(_) => TestPathPattern {
            pattern,
            warning: None,
        },
        Err(e) => {
            let warning = format!("Invalid testPattern {pattern} supplied. Running all tests instead.");
            tracing::warn!(error = %e, "{warning}");
            TestPathPattern {
                pattern: String::new(),
                warning: Some(warning),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positional_arguments_form_an_alternation() {
        let built = build_test_path_pattern_with(&strings(&["foo", "bar"]), &[], '/');
        assert_eq!(built.pattern, "foo|bar");
        assert!(built.warning.is_none());
    }

    #[test]
    fn flag_entries_follow_positional_ones() {
        let built = build_test_path_pattern_with(&strings(&["a"]), &strings(&["b", "c"]), '/');
        assert_eq!(built.pattern, "a|b|c");
    }

    #[rstest]
    #[case('/', "src/foo", "src/foo")]
    #[case('\\', "src/foo", "src\\\\foo")]
    fn separators_are_escaped_off_posix(#[case] sep: char, #[case] input: &str, #[case] expected: &str) {
        let built = build_test_path_pattern_with(&strings(&[input]), &[], sep);
        assert_eq!(built.pattern, expected);
    }

    #[test]
    fn invalid_pattern_falls_back_to_match_all() {
        let built = build_test_path_pattern_with(&strings(&["foo("]), &[], '/');
        assert_eq!(built.pattern, "");
        assert_eq!(
            built.warning.as_deref(),
            Some("Invalid testPattern foo( supplied. Running all tests instead.")
        );
    }

    #[test]
    fn nothing_selected_is_empty_pattern() {
        let built = build_test_path_pattern(&[], &[]);
        assert_eq!(built.pattern, "");
        assert!(built.warning.is_none());
    }
}
