//! Glob matching boundary.
//!
//! Normalization only produces patterns. The one place it needs to test a
//! path against a pattern (narrowing coverage to related files) goes
//! through [`PatternMatcher`] so the matching semantics stay pluggable.

use glob::{MatchOptions, Pattern};

pub trait PatternMatcher: Send + Sync {
    /// Whether `path` (relative, `/`-separated) matches glob `pattern`.
    fn is_match(&self, pattern: &str, path: &str) -> bool;
}

/// [`PatternMatcher`] backed by the `glob` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobPatternMatcher;

impl GlobPatternMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for GlobPatternMatcher {
    fn is_match(&self, pattern: &str, path: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        match Pattern::new(pattern) {
            Ok(compiled) => compiled.matches_with(path, options),
            Err(e) => {
                tracing::debug!(%pattern, error = %e, "Unparseable glob never matches");
                false
            }
        }
    }
}
