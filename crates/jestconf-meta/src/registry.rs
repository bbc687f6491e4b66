//! Lookup registry over the option specification table.

use crate::deprecated;
use crate::options::{OPTIONS, OptionSpec, Rule};
use std::collections::HashMap;

/// Registry mapping option keys to their specification rows.
///
/// # Example
///
/// ```
/// use jestconf_meta::{OptionRegistry, Rule};
///
/// let registry = OptionRegistry::with_builtins();
/// assert_eq!(registry.rule_for("roots"), Some(Rule::PathList));
/// assert!(registry.rule_for("someFutureOption").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    specs: HashMap<&'static str, OptionSpec>,
}

impl OptionRegistry {
    /// Create a registry holding every built-in option.
    pub fn with_builtins() -> Self {
        Self::from_specs(OPTIONS)
    }

    /// Create a registry from an explicit table.
    pub fn from_specs(specs: &[OptionSpec]) -> Self {
        Self {
            specs: specs.iter().map(|spec| (spec.key, *spec)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.specs.get(key)
    }

    pub fn rule_for(&self, key: &str) -> Option<Rule> {
        self.specs.get(key).map(|spec| spec.rule)
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.specs.contains_key(key)
    }

    pub fn is_deprecated(&self, key: &str) -> bool {
        deprecated::alias_for(key).is_some()
    }

    /// Known option keys, sorted.
    pub fn list_known(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.specs.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
