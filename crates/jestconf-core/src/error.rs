//! Error types for jestconf-core

use jestconf_meta::validation::DOCUMENTATION_URL;
use std::fmt;

/// Result type for jestconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

const HEADER: &str = "\u{25cf} Validation Error:\n\n ";

/// Trailing pointer to the configuration documentation.
struct DocsNote;

impl fmt::Display for DocsNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\n  Configuration Documentation:\n  {DOCUMENTATION_URL}")
    }
}

/// Errors that abort normalization.
///
/// Option names inside messages are double-quoted so a caller can
/// highlight them; [`Error::options`] lists them for precise reporting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{h} Configuration option \"rootDir\" must be specified.{d}", h = HEADER, d = DocsNote)]
    MissingRootDir,

    /// Two options that cannot both take effect.
    #[error("{h} Options: \"{first}\" and \"{second}\" cannot be used together.{hint}{d}", h = HEADER, d = DocsNote)]
    ExclusiveOptions {
        first: String,
        second: String,
        hint: String,
    },

    #[error(
        "{h} Option \"moduleFileExtensions\" must include 'js':\n  but instead received:\n    {received}\n  Please change your configuration to include 'js'.{d}",
        h = HEADER,
        d = DocsNote
    )]
    ModuleFileExtensionsMissingJs { received: String },

    #[error("{h} {0}{d}", h = HEADER, d = DocsNote)]
    Preset(#[from] jestconf_presets::Error),

    #[error(
        "{h} Module {path} in the \"{key}\" option was not found.\n         <rootDir> is: {root_dir}{d}",
        h = HEADER,
        d = DocsNote
    )]
    ModuleNotFound {
        key: String,
        path: String,
        root_dir: String,
    },

    #[error(
        "{h} Could not resolve a module for a custom reporter.\n  Module name: {path}{d}",
        h = HEADER,
        d = DocsNote
    )]
    ReporterNotFound { path: String },

    #[error(
        "{h} Test environment {name} cannot be found. Make sure the \"testEnvironment\" configuration option points to an existing node module.{d}",
        h = HEADER,
        d = DocsNote
    )]
    TestEnvironmentNotFound { name: String },

    #[error(
        "{h} Jest Runner {name} cannot be found. Make sure the \"runner\" configuration option points to an existing node module.{d}",
        h = HEADER,
        d = DocsNote
    )]
    RunnerNotFound { name: String },

    #[error(
        "{h} Watch plugin {name} cannot be found. Make sure the \"watchPlugins\" configuration option points to an existing node module.{d}",
        h = HEADER,
        d = DocsNote
    )]
    WatchPluginNotFound { name: String },

    #[error("{h} Option \"{key}\" {message}{d}", h = HEADER, d = DocsNote)]
    InvalidOption { key: String, message: String },

    /// Schema violation reported by the validator.
    #[error(transparent)]
    Validation(#[from] jestconf_meta::ValidationError),

    /// Reading a configuration file failed.
    #[error(transparent)]
    Fs(#[from] jestconf_fs::Error),
}

impl Error {
    pub(crate) fn exclusive(first: &str, second: &str, replacement: Option<&str>) -> Self {
        let hint = replacement
            .map(|r| format!(" Please change your configuration to only use \"{r}\"."))
            .unwrap_or_default();
        Self::ExclusiveOptions {
            first: first.to_string(),
            second: second.to_string(),
            hint,
        }
    }

    pub(crate) fn module_not_found(key: &str, path: &str, root_dir: &str) -> Self {
        Self::ModuleNotFound {
            key: key.to_string(),
            path: path.to_string(),
            root_dir: root_dir.to_string(),
        }
    }

    pub(crate) fn invalid_option(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Names of the options the error is about.
    pub fn options(&self) -> Vec<&str> {
        match self {
            Self::MissingRootDir => vec!["rootDir"],
            Self::ExclusiveOptions { first, second, .. } => vec![first.as_str(), second.as_str()],
            Self::ModuleFileExtensionsMissingJs { .. } => vec!["moduleFileExtensions"],
            Self::Preset(_) => vec!["preset"],
            Self::ModuleNotFound { key, .. } | Self::InvalidOption { key, .. } => {
                vec![key.as_str()]
            }
            Self::ReporterNotFound { .. } => vec!["reporters"],
            Self::TestEnvironmentNotFound { .. } => vec!["testEnvironment"],
            Self::RunnerNotFound { .. } => vec!["runner"],
            Self::WatchPluginNotFound { .. } => vec!["watchPlugins"],
            Self::Validation(e) => vec![e.option.as_str()],
            Self::Fs(_) => Vec::new(),
        }
    }
}
