//! Filesystem and path primitives for jestconf
//!
//! Provides normalized path handling, `<rootDir>` token substitution,
//! glob/regex separator conversion, format-agnostic config loading and
//! Node-style module resolution.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod resolver;
pub mod tokens;

pub use config::ConfigStore;
pub use constants::{ModulePrefix, ROOT_DIR_TOKEN};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use resolver::{ModuleResolver, NodeResolver};
