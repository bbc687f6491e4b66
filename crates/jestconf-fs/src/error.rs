//! Error types for jestconf-fs

use std::path::PathBuf;

/// Result type for jestconf-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jestconf-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a parse failure rather than a read failure.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ConfigParse { .. })
    }
}
