//! Configuration normalization for jestconf
//!
//! Turns loosely structured, user-authored test configuration into one
//! canonical [`NormalizedConfig`]: paths absolute, module references
//! resolved, patterns converted for their engines and cross-option rules
//! enforced once.
//!
//! # Architecture
//!
//! `jestconf-core` sits above the layer 0 crates and below the CLI:
//!
//! ```text
//!                      jestconf-cli
//!                           |
//!                     jestconf-core
//!                           |
//!        +------------------+------------------+
//!        |                  |                  |
//!   jestconf-fs       jestconf-meta     jestconf-presets
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use jestconf_core::{Argv, Normalizer, RawConfigReader};
//! use jestconf_fs::NormalizedPath;
//!
//! fn example() -> jestconf_core::Result<()> {
//!     let raw = RawConfigReader::new().read(&NormalizedPath::new("jest.config.json"))?;
//!     let argv = Argv::new().with_flag("ci", true).with_positional(["button"]);
//!     let normalized = Normalizer::new().normalize(raw.options, &argv)?;
//!     println!("{}", normalized.config.test_path_pattern());
//!     Ok(())
//! }
//! ```

pub mod argv;
pub mod config;
pub mod error;
pub mod normalize;

pub use argv::Argv;
pub use config::{
    NormalizedConfig, RawConfig, RawConfigReader, ReporterConfig, SnapshotUpdate, TransformEntry,
    WatchPlugin,
};
pub use error::{Error, Result};
pub use normalize::{
    GlobPatternMatcher, NormalizationReport, Normalized, Normalizer, PatternMatcher,
    TestPathPattern, build_test_path_pattern,
};
