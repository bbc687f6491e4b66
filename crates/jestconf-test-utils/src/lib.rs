//! Shared test utilities for the jestconf workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for throwaway project trees with
//!   a fake `node_modules`

pub mod project;

pub use project::TestProject;
