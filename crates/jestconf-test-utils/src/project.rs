//! [`TestProject`] builder for normalization test scenarios.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Packages the normalizer resolves when the configuration leaves the
/// corresponding option unset.
pub const DEFAULT_MODULES: &[&str] = &[
    "jest-environment-jsdom",
    "jest-jasmine2",
    "babel-jest",
];

/// A temporary project directory with helpers for laying out config files
/// and installed packages.
///
/// # Example
///
/// ```rust,no_run
/// use jestconf_test_utils::TestProject;
///
/// let project = TestProject::new().with_default_modules();
/// project.add_preset("my-preset", &serde_json::json!({"verbose": true}));
/// project.write("jest.config.json", r#"{"preset": "my-preset"}"#);
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // Temp dirs can sit behind symlinks (macOS /var); use the real path
        // so it compares equal to canonicalized resolver output.
        let root = temp_dir.path().canonicalize().unwrap();
        Self { temp_dir, root }
    }

    /// Root of the project.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root as a forward-slash string.
    pub fn root_str(&self) -> String {
        self.root.to_string_lossy().replace('\\', "/")
    }

    /// Absolute forward-slash path of `relative` under the root.
    pub fn path(&self, relative: &str) -> String {
        format!("{}/{}", self.root_str(), relative.trim_start_matches('/'))
    }

    /// Write `content` at `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let full = self.root.join(relative);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        full
    }

    /// Write `value` as pretty JSON at `relative`.
    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        self.write(relative, &serde_json::to_string_pretty(value).unwrap())
    }

    /// Install a package with an `index.js` under `node_modules`.
    pub fn add_module(&self, name: &str) -> PathBuf {
        self.write(&format!("node_modules/{name}/index.js"), "module.exports = {};\n")
    }

    /// Install a package that ships a `jest-preset.json`.
    pub fn add_preset(&self, name: &str, preset: &Value) -> PathBuf {
        self.add_module(name);
        self.write_json(&format!("node_modules/{name}/jest-preset.json"), preset)
    }

    /// Install the packages the normalizer falls back to, plus the
    /// regenerator runtime.
    pub fn with_default_modules(self) -> Self {
        for name in DEFAULT_MODULES {
            self.add_module(name);
        }
        self.write(
            "node_modules/regenerator-runtime/runtime.js",
            "module.exports = {};\n",
        );
        self
    }

    /// Keep the directory alive past the builder, for CLI tests that need a
    /// plain path.
    pub fn temp_dir(&self) -> &TempDir {
        &self.temp_dir
    }

    /// Assert that `relative` exists under the root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full = self.root.join(relative);
        assert!(full.exists(), "Expected file to exist: {}", full.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_modules_are_installed() {
        let project = TestProject::new().with_default_modules();
        for name in DEFAULT_MODULES {
            project.assert_file_exists(&format!("node_modules/{name}/index.js"));
        }
        project.assert_file_exists("node_modules/regenerator-runtime/runtime.js");
    }

    #[test]
    fn path_joins_with_forward_slashes() {
        let project = TestProject::new();
        assert!(project.path("/a/b.js").ends_with("/a/b.js"));
        assert!(!project.path("a").contains("//a"));
    }
}
