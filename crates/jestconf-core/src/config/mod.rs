//! Configuration input and output.
//!
//! - [`RawConfigReader`] reads user-authored options from a config file or
//!   the `jest` field of a `package.json`.
//! - [`NormalizedConfig`] is the canonical result of normalization, with
//!   typed accessors over its ordered option table.

mod normalized;
mod reader;

pub use normalized::{NormalizedConfig, ReporterConfig, SnapshotUpdate, TransformEntry, WatchPlugin};
pub use reader::{RawConfig, RawConfigReader};
