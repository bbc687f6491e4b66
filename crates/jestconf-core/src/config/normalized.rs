//! The canonical configuration structure.

use jestconf_fs::NormalizedPath;
use serde::Serialize;
use serde_json::{Map, Value};

/// Keys produced from command-line state rather than authored options.
const COMPUTED_KEYS: &[&str] = &["nonFlagArgs", "testPathPattern", "updateSnapshot"];

/// Snapshot update mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotUpdate {
    /// Rewrite every snapshot.
    All,
    /// Write snapshots that do not exist yet.
    New,
    /// Never write snapshots.
    None,
}

impl SnapshotUpdate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::New => "new",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "new" => Some(Self::New),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// One `transform` entry: a regex source and the compiler handling matches.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformEntry {
    pub pattern: String,
    pub path: String,
    pub options: Value,
}

/// A resolved watch plugin with its own options.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchPlugin {
    pub path: String,
    pub config: Value,
}

/// A reporter: a built-in name or a resolved module path, plus options.
#[derive(Debug, Clone, PartialEq)]
pub struct ReporterConfig {
    pub path: String,
    pub options: Value,
}

/// Fully normalized configuration.
///
/// Stored as an ordered option table so unknown options survive untouched;
/// the accessors below give typed views of the options the pipeline
/// normalizes. Instances only come out of the normalizer and are not
/// mutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedConfig {
    options: Map<String, Value>,
}

impl NormalizedConfig {
    pub(crate) fn from_options(options: Map<String, Value>) -> Self {
        Self { options }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn root_dir(&self) -> NormalizedPath {
        NormalizedPath::new(self.str_of("rootDir").unwrap_or_default())
    }

    pub fn name(&self) -> &str {
        self.str_of("name").unwrap_or_default()
    }

    pub fn bail(&self) -> u64 {
        self.get("bail").and_then(Value::as_u64).unwrap_or(0)
    }

    pub fn roots(&self) -> Vec<String> {
        self.strings_of("roots")
    }

    pub fn test_match(&self) -> Vec<String> {
        self.strings_of("testMatch")
    }

    pub fn test_regex(&self) -> Vec<String> {
        self.strings_of("testRegex")
    }

    pub fn setup_files(&self) -> Vec<String> {
        self.strings_of("setupFiles")
    }

    pub fn setup_files_after_env(&self) -> Vec<String> {
        self.strings_of("setupFilesAfterEnv")
    }

    pub fn collect_coverage_from(&self) -> Vec<String> {
        self.strings_of("collectCoverageFrom")
    }

    /// Paths of `collectCoverageOnlyFrom`, in table order.
    pub fn collect_coverage_only_from(&self) -> Vec<String> {
        self.get("collectCoverageOnlyFrom")
            .and_then(Value::as_object)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn non_flag_args(&self) -> Vec<String> {
        self.strings_of("nonFlagArgs")
    }

    pub fn test_path_pattern(&self) -> &str {
        self.str_of("testPathPattern").unwrap_or_default()
    }

    pub fn test_environment(&self) -> Option<&str> {
        self.str_of("testEnvironment")
    }

    pub fn test_runner(&self) -> Option<&str> {
        self.str_of("testRunner")
    }

    pub fn only_changed(&self) -> bool {
        self.get("onlyChanged").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn max_workers(&self) -> u64 {
        self.get("maxWorkers").and_then(Value::as_u64).unwrap_or(1)
    }

    pub fn update_snapshot(&self) -> SnapshotUpdate {
        self.str_of("updateSnapshot")
            .and_then(SnapshotUpdate::parse)
            .unwrap_or(SnapshotUpdate::New)
    }

    pub fn transform(&self) -> Vec<TransformEntry> {
        self.entries_of("transform")
            .filter_map(|entry| {
                Some(TransformEntry {
                    pattern: entry.first()?.as_str()?.to_string(),
                    path: entry.get(1)?.as_str()?.to_string(),
                    options: entry.get(2).cloned().unwrap_or_else(empty_object),
                })
            })
            .collect()
    }

    /// `(pattern, replacement)` pairs; a replacement may be a list of
    /// candidates.
    pub fn module_name_mapper(&self) -> Vec<(String, Value)> {
        self.entries_of("moduleNameMapper")
            .filter_map(|entry| Some((entry.first()?.as_str()?.to_string(), entry.get(1)?.clone())))
            .collect()
    }

    pub fn watch_plugins(&self) -> Vec<WatchPlugin> {
        self.get("watchPlugins")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|plugin| {
                Some(WatchPlugin {
                    path: plugin.get("path")?.as_str()?.to_string(),
                    config: plugin.get("config").cloned().unwrap_or_else(empty_object),
                })
            })
            .collect()
    }

    pub fn reporters(&self) -> Vec<ReporterConfig> {
        self.entries_of("reporters")
            .filter_map(|entry| {
                Some(ReporterConfig {
                    path: entry.first()?.as_str()?.to_string(),
                    options: entry.get(1).cloned().unwrap_or_else(empty_object),
                })
            })
            .collect()
    }

    /// Render back into user-authorable options.
    ///
    /// Tables normalized into entry lists become ordered objects again,
    /// watch plugins become `[path, config]` pairs, and values computed from
    /// command-line state are dropped. Normalizing the result against an
    /// empty command line reproduces this configuration.
    pub fn to_raw_options(&self) -> Map<String, Value> {
        let mut raw = self.options.clone();
        for key in COMPUTED_KEYS {
            raw.remove(*key);
        }

        let transform: Map<String, Value> = self
            .transform()
            .into_iter()
            .map(|entry| {
                let target = match &entry.options {
                    Value::Object(opts) if opts.is_empty() => Value::String(entry.path),
                    opts => Value::Array(vec![Value::String(entry.path), opts.clone()]),
                };
                (entry.pattern, target)
            })
            .collect();
        raw.insert("transform".into(), Value::Object(transform));

        let mapper: Map<String, Value> = self.module_name_mapper().into_iter().collect();
        raw.insert("moduleNameMapper".into(), Value::Object(mapper));

        let plugins: Vec<Value> = self
            .watch_plugins()
            .into_iter()
            .map(|plugin| Value::Array(vec![Value::String(plugin.path), plugin.config]))
            .collect();
        raw.insert("watchPlugins".into(), Value::Array(plugins));

        raw
    }

    fn str_of(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn strings_of(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entries_of(&self, key: &str) -> impl Iterator<Item = &Vec<Value>> {
        self.get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_array)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(value: Value) -> NormalizedConfig {
        NormalizedConfig::from_options(value.as_object().cloned().unwrap())
    }

    #[test]
    fn typed_accessors_read_normalized_shapes() {
        let cfg = config(json!({
            "rootDir": "/project",
            "bail": 1,
            "transform": [["^.+\\.js$", "/project/t.js", {"x": 1}]],
            "moduleNameMapper": [["^a$", "/project/a.js"]],
            "watchPlugins": [{"path": "/project/p.js", "config": {}}],
            "reporters": [["default", {}]],
            "updateSnapshot": "none"
        }));
        assert_eq!(cfg.root_dir().as_str(), "/project");
        assert_eq!(cfg.bail(), 1);
        assert_eq!(
            cfg.transform(),
            vec![TransformEntry {
                pattern: "^.+\\.js$".into(),
                path: "/project/t.js".into(),
                options: json!({"x": 1}),
            }]
        );
        assert_eq!(cfg.module_name_mapper(), vec![("^a$".into(), json!("/project/a.js"))]);
        assert_eq!(cfg.watch_plugins()[0].path, "/project/p.js");
        assert_eq!(cfg.reporters()[0].path, "default");
        assert_eq!(cfg.update_snapshot(), SnapshotUpdate::None);
    }

    #[test]
    fn raw_options_rebuild_tables_and_drop_computed_keys() {
        let cfg = config(json!({
            "rootDir": "/project",
            "transform": [
                ["^a$", "/project/a.js", {}],
                ["^b$", "/project/b.js", {"opt": true}]
            ],
            "moduleNameMapper": [["^m$", "/project/m.js"]],
            "watchPlugins": [{"path": "/project/p.js", "config": {"key": "k"}}],
            "nonFlagArgs": ["x"],
            "testPathPattern": "x",
            "updateSnapshot": "new"
        }));
        let raw = cfg.to_raw_options();
        assert_eq!(
            raw["transform"],
            json!({"^a$": "/project/a.js", "^b$": ["/project/b.js", {"opt": true}]})
        );
        assert_eq!(raw["moduleNameMapper"], json!({"^m$": "/project/m.js"}));
        assert_eq!(raw["watchPlugins"], json!([["/project/p.js", {"key": "k"}]]));
        for key in COMPUTED_KEYS {
            assert!(!raw.contains_key(*key));
        }
    }
}
