//! Schema validation of raw options.
//!
//! The pipeline treats validation as a collaborator behind
//! [`OptionValidator`]; [`SchemaValidator`] is the built-in implementation
//! checking top-level shapes against the [`OptionRegistry`].

use crate::deprecated;
use crate::options::Shape;
use crate::registry::OptionRegistry;
use serde_json::{Map, Value};

/// Where configuration errors point the reader.
pub const DOCUMENTATION_URL: &str = "https://jestjs.io/docs/configuration.html";

/// A schema violation. Rendered in the bullet/documentation-note format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "\u{25cf} Validation Error:\n\n{message}\n\n  Configuration Documentation:\n  {url}",
    url = DOCUMENTATION_URL
)]
pub struct ValidationError {
    pub option: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Result of a successful validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub has_deprecation_warnings: bool,
    /// Human-readable deprecation notes, one per deprecated key used.
    pub deprecations: Vec<String>,
    /// Keys not present in the registry; they pass through unchanged.
    pub unknown: Vec<String>,
}

/// Validates raw options before normalization.
pub trait OptionValidator: Send + Sync {
    fn validate(
        &self,
        options: &Map<String, Value>,
        registry: &OptionRegistry,
    ) -> Result<ValidationOutcome, ValidationError>;
}

/// Top-level shape validator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl OptionValidator for SchemaValidator {
    fn validate(
        &self,
        options: &Map<String, Value>,
        registry: &OptionRegistry,
    ) -> Result<ValidationOutcome, ValidationError> {
        let mut outcome = ValidationOutcome::default();

        for (key, value) in options {
            let Some(spec) = registry.get(key) else {
                tracing::warn!(option = %key, "Unknown option; passing it through unchanged");
                outcome.unknown.push(key.clone());
                continue;
            };

            if !spec.shapes.iter().any(|shape| shape.matches(value)) {
                let expected = spec
                    .shapes
                    .iter()
                    .map(Shape::as_str)
                    .collect::<Vec<_>>()
                    .join(" or ");
                return Err(ValidationError::new(
                    key.clone(),
                    format!(
                        "  Option \"{key}\" must be of type:\n    {expected}\n  but instead received:\n    {}",
                        Shape::name_of(value)
                    ),
                ));
            }

            if let Some(alias) = deprecated::alias_for(key) {
                tracing::warn!(option = %key, "{}", alias.message);
                outcome.has_deprecation_warnings = true;
                outcome.deprecations.push(alias.message.to_string());
            }
        }

        Ok(outcome)
    }
}
