//! Option metadata for jestconf.
//!
//! This crate holds the declarative side of normalization: which options
//! exist, which normalization rule each one follows, what shapes it accepts,
//! which legacy names alias onto current ones and what the defaults are. It
//! also provides the schema validator the pipeline calls before normalizing.

#![recursion_limit = "256"]

pub mod defaults;
pub mod deprecated;
pub mod options;
pub mod registry;
pub mod validation;

pub use deprecated::{Alias, Conflict, DEPRECATED_OPTIONS};
pub use options::{OptionSpec, Presence, Rule, Shape, Structural};
pub use registry::OptionRegistry;
pub use validation::{OptionValidator, SchemaValidator, ValidationError, ValidationOutcome};
