//! Error types for jestconf-presets

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] jestconf_fs::Error),

    #[error("Preset {preset} not found.")]
    NotFound { preset: String },

    #[error("Module {preset} should have a jest-preset file (.json, .yaml, .yml or .toml) at the root.")]
    MissingPresetFile { preset: String },

    #[error("Preset {preset} is invalid:\n\n  {message}")]
    Invalid {
        preset: String,
        path: PathBuf,
        message: String,
    },
}

impl Error {
    /// The preset specifier the error concerns, if any.
    pub fn preset(&self) -> Option<&str> {
        match self {
            Self::Fs(_) => None,
            Self::NotFound { preset }
            | Self::MissingPresetFile { preset }
            | Self::Invalid { preset, .. } => Some(preset),
        }
    }
}
