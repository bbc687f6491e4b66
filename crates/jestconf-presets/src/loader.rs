//! Preset location and loading.
//!
//! A [`PresetLoader`] is created per normalization run and keeps no cache:
//! every [`PresetLoader::load`] reads the preset file from disk, so sibling
//! configurations normalized in one process never observe each other's
//! preset state.

use crate::{Error, Result};
use jestconf_fs::constants::{PRESET_EXTENSIONS, PRESET_NAME};
use jestconf_fs::tokens::replace_root_dir_in_path;
use jestconf_fs::{ConfigStore, ModuleResolver, NormalizedPath};
use serde_json::{Map, Value};

/// Locates and reads presets through a module resolver.
pub struct PresetLoader<'a> {
    resolver: &'a dyn ModuleResolver,
    store: ConfigStore,
}

impl<'a> PresetLoader<'a> {
    pub fn new(resolver: &'a dyn ModuleResolver) -> Self {
        Self {
            resolver,
            store: ConfigStore::new(),
        }
    }

    /// Find the preset file for `preset`.
    ///
    /// Specifiers starting with `.` name the preset file directly. Anything
    /// else names a package whose root holds a `jest-preset` file.
    pub fn locate(&self, root_dir: &NormalizedPath, preset: &str) -> Result<NormalizedPath> {
        let preset_path = replace_root_dir_in_path(root_dir, preset);
        let specifier = if preset_path.starts_with('.') {
            preset_path.clone()
        } else {
            format!("{}/{}", preset_path.trim_end_matches('/'), PRESET_NAME)
        };

        if let Some(found) =
            self.resolver
                .resolve_with_extensions(&specifier, root_dir, PRESET_EXTENSIONS)
        {
            return Ok(found);
        }

        if self.resolver.resolve(&preset_path, root_dir).is_some() {
            Err(Error::MissingPresetFile {
                preset: preset_path,
            })
        } else {
            Err(Error::NotFound {
                preset: preset_path,
            })
        }
    }

    /// Read the preset's options, straight from disk.
    pub fn load(&self, root_dir: &NormalizedPath, preset: &str) -> Result<Map<String, Value>> {
        let path = self.locate(root_dir, preset)?;
        tracing::debug!(%path, %preset, "Loading preset");

        let invalid = |message: String| Error::Invalid {
            preset: preset.to_string(),
            path: path.to_native(),
            message,
        };

        let value: Value = self.store.load(&path).map_err(|e| match e {
            jestconf_fs::Error::ConfigParse { message, .. } => invalid(message),
            jestconf_fs::Error::UnsupportedFormat { extension } => {
                invalid(format!("unsupported preset format \"{extension}\""))
            }
            other => Error::Fs(other),
        })?;

        match value {
            Value::Object(options) => Ok(options),
            other => Err(invalid(format!(
                "a preset must export an object of options, found {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
