//! Command-line overrides.
//!
//! [`Argv`] carries parsed flags (keyed by option name, camelCase) plus the
//! ordered positional arguments. Flags take precedence over file options;
//! [`Argv::apply_to`] performs that layering.

use serde_json::{Map, Value};

/// Flags that never become options.
const SPECIAL_ARGS: &[&str] = &["_", "$0", "h", "help", "config"];

/// Options accepted on the command line as JSON-object strings.
const JSON_OPTIONS: &[&str] = &[
    "coverageThreshold",
    "globals",
    "haste",
    "moduleNameMapper",
    "testEnvironmentOptions",
    "transform",
];

/// Parsed command-line flags and positional arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Argv {
    flags: Map<String, Value>,
    positional: Vec<String>,
}

impl Argv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set_flag(key, value);
        self
    }

    pub fn set_flag(&mut self, key: &str, value: impl Into<Value>) {
        self.flags.insert(key.to_string(), value.into());
    }

    pub fn with_positional<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn flags(&self) -> &Map<String, Value> {
        &self.flags
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.flags.get(key).filter(|v| !v.is_null())
    }

    /// Whether the flag is present with a truthy value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// A flag given once or repeated, as a list of strings.
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Inline JSON configuration passed through `--config`.
    pub fn inline_config(&self) -> Option<Map<String, Value>> {
        let raw = self.string("config")?;
        if !raw.trim_start().starts_with('{') {
            return None;
        }
        match serde_json::from_str(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => {
                tracing::warn!("Ignoring --config value that is not a JSON object");
                None
            }
        }
    }

    /// Layer these overrides over file `options`.
    ///
    /// Precedence, lowest first: file options, inline `--config` JSON,
    /// flags. A few flags are renamed on the way in (`coverage` becomes
    /// `collectCoverage`, `json` becomes `useStderr`, `env` becomes
    /// `testEnvironment`) and `watchAll` switches `watch` off.
    pub fn apply_to(&self, mut options: Map<String, Value>) -> Map<String, Value> {
        if let Some(inline) = self.inline_config() {
            options.extend(inline);
        }

        for (key, value) in &self.flags {
            if value.is_null() || SPECIAL_ARGS.contains(&key.as_str()) {
                continue;
            }
            match key.as_str() {
                "coverage" => {
                    options.insert("collectCoverage".into(), value.clone());
                }
                "json" => {
                    options.insert("useStderr".into(), value.clone());
                }
                "watchAll" => {
                    options.insert("watch".into(), Value::Bool(false));
                    options.insert("watchAll".into(), value.clone());
                }
                "env" => {
                    options.insert("testEnvironment".into(), value.clone());
                }
                k if JSON_OPTIONS.contains(&k) => match value {
                    Value::String(s) => match serde_json::from_str::<Value>(s) {
                        Ok(parsed @ Value::Object(_)) => {
                            options.insert(key.clone(), parsed);
                        }
                        _ => tracing::warn!(option = %key, "Ignoring flag that is not a JSON object"),
                    },
                    Value::Object(_) => {
                        options.insert(key.clone(), value.clone());
                    }
                    _ => tracing::warn!(option = %key, "Ignoring flag that is not a JSON object"),
                },
                _ => {
                    options.insert(key.clone(), value.clone());
                }
            }
        }

        options
    }
}

/// Truthiness as configuration authors expect it: `false`, `0`, `""` and
/// `null` are off.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
