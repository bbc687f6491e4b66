//! Well-known tokens, file names and module name prefixes.

/// Token substituted with the project root directory.
pub const ROOT_DIR_TOKEN: &str = "<rootDir>";

/// Base name of the file a preset package exposes at its root.
pub const PRESET_NAME: &str = "jest-preset";

/// Extensions tried, in order, when locating a preset file.
pub const PRESET_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

/// Extensions tried, in order, when resolving a module specifier.
pub const MODULE_EXTENSIONS: &[&str] = &["js", "json", "node"];

/// Directory searched for bare module specifiers.
pub const NODE_MODULES: &str = "node_modules";

/// Manifest file that may carry an embedded configuration.
pub const PACKAGE_JSON: &str = "package.json";

/// Field of [`PACKAGE_JSON`] holding the embedded configuration.
pub const PACKAGE_JSON_FIELD: &str = "jest";

/// Prefixes tried before the bare name when resolving a named module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulePrefix {
    /// Test environments (`jsdom` -> `jest-environment-jsdom`)
    Environment,
    /// Test runners (`electron` -> `jest-runner-electron`)
    Runner,
    /// Watch plugins (`typeahead` -> `jest-watch-typeahead`)
    WatchPlugin,
}

impl ModulePrefix {
    /// Get the string representation of the prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "jest-environment-",
            Self::Runner => "jest-runner-",
            Self::WatchPlugin => "jest-watch-",
        }
    }

    /// Candidate specifiers for `name`, prefixed form first.
    ///
    /// Names that already carry the prefix yield only themselves.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        if name.starts_with(self.as_str()) {
            vec![name.to_string()]
        } else {
            vec![format!("{}{}", self.as_str(), name), name.to_string()]
        }
    }
}

impl std::fmt::Display for ModulePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
