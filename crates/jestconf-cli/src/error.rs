//! Error types for jestconf-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from jestconf-core
    #[error(transparent)]
    Core(#[from] jestconf_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to render output
    #[error("Failed to serialize configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Option names the error refers to, for highlighting.
    pub fn options(&self) -> Vec<&str> {
        match self {
            Self::Core(e) => e.options(),
            _ => Vec::new(),
        }
    }
}
