//! Preset support for jestconf.
//!
//! A preset is a configuration fragment shipped by a package (or a local
//! file) that seeds option values before the user's own options are layered
//! on. This crate locates and loads presets and merges them with user
//! options.

pub mod error;
pub mod loader;
pub mod merge;

pub use error::{Error, Result};
pub use loader::PresetLoader;
pub use merge::merge_with_preset;
