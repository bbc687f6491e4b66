//! Reading user-authored options from disk.

use crate::Result;
use jestconf_fs::constants::{PACKAGE_JSON, PACKAGE_JSON_FIELD};
use jestconf_fs::{ConfigStore, NormalizedPath};
use serde_json::{Map, Value};

/// Config file names probed, in order, when given a directory.
const CONFIG_FILE_NAMES: &[&str] = &[
    "jest.config.json",
    "jest.config.toml",
    "jest.config.yaml",
    "jest.config.yml",
];

/// Options read from disk, with the file they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig {
    pub options: Map<String, Value>,
    pub config_path: Option<NormalizedPath>,
}

/// Reads raw options from a config file or a `package.json`.
///
/// `rootDir` defaults to the directory holding the config file; a relative
/// `rootDir` is resolved against that directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawConfigReader {
    store: ConfigStore,
}

impl RawConfigReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from `path`, which may be a config file, a
    /// `package.json` or a directory to search.
    pub fn read(&self, path: &NormalizedPath) -> Result<RawConfig> {
        if path.is_dir() {
            return self.discover(path);
        }

        let value: Value = self.store.load(path)?;
        let options = if path.file_name() == Some(PACKAGE_JSON) {
            value.get(PACKAGE_JSON_FIELD).cloned().unwrap_or(Value::Null)
        } else {
            value
        };
        let options = match options {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                tracing::warn!(%path, "Configuration is not an object; ignoring {other}");
                Map::new()
            }
        };

        let dir = path.parent().unwrap_or_else(|| NormalizedPath::new("."));
        tracing::debug!(%path, "Read configuration");
        Ok(RawConfig {
            options: with_root_dir(options, &dir),
            config_path: Some(path.clone()),
        })
    }

    /// Search `dir` for a config file, then a `package.json`.
    ///
    /// With neither present the options are just `rootDir = dir`.
    pub fn discover(&self, dir: &NormalizedPath) -> Result<RawConfig> {
        let candidates = CONFIG_FILE_NAMES.iter().chain(std::iter::once(&PACKAGE_JSON));
        for name in candidates {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return self.read(&candidate);
            }
        }

        tracing::debug!(%dir, "No configuration file found");
        Ok(RawConfig {
            options: with_root_dir(Map::new(), dir),
            config_path: None,
        })
    }
}

fn with_root_dir(mut options: Map<String, Value>, dir: &NormalizedPath) -> Map<String, Value> {
    let root_dir = match options.get("rootDir").and_then(Value::as_str) {
        Some(root) => dir.resolve(root),
        None => dir.clone(),
    };
    options.insert("rootDir".into(), Value::String(root_dir.as_str().to_string()));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use jestconf_test_utils::TestProject;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn root_dir_defaults_to_config_directory() {
        let project = TestProject::new();
        project.write_json("config/jest.config.json", &json!({"verbose": true}));

        let raw = RawConfigReader::new()
            .read(&NormalizedPath::new(project.path("config/jest.config.json")))
            .unwrap();

        assert_eq!(raw.options["rootDir"], json!(project.path("config")));
        assert_eq!(raw.options["verbose"], json!(true));
    }

    #[test]
    fn relative_root_dir_resolves_against_config_directory() {
        let project = TestProject::new();
        project.write_json("config/jest.config.json", &json!({"rootDir": "../app"}));

        let raw = RawConfigReader::new()
            .read(&NormalizedPath::new(project.path("config/jest.config.json")))
            .unwrap();

        assert_eq!(raw.options["rootDir"], json!(project.path("app")));
    }

    #[test]
    fn package_json_field_is_used() {
        let project = TestProject::new();
        project.write_json("package.json", &json!({"name": "x", "jest": {"bail": 1}}));

        let raw = RawConfigReader::new()
            .discover(&NormalizedPath::new(project.root()))
            .unwrap();

        assert_eq!(raw.options["bail"], json!(1));
        assert!(!raw.options.contains_key("name"));
    }

    #[test]
    fn toml_config_file_is_discovered() {
        let project = TestProject::new();
        project.write("jest.config.toml", "verbose = true\n");

        let raw = RawConfigReader::new()
            .read(&NormalizedPath::new(project.root()))
            .unwrap();

        assert_eq!(raw.options["verbose"], json!(true));
        assert!(raw.config_path.unwrap().as_str().ends_with("jest.config.toml"));
    }

    #[test]
    fn empty_directory_yields_only_root_dir() {
        let project = TestProject::new();
        let raw = RawConfigReader::new()
            .discover(&NormalizedPath::new(project.root()))
            .unwrap();
        assert_eq!(raw.options.len(), 1);
        assert!(raw.config_path.is_none());
    }
}
