//! The normalization pipeline.
//!
//! [`Normalizer::normalize`] runs the stages in a fixed order:
//!
//! 1. layer command-line overrides over the raw options
//! 2. validate option shapes
//! 3. reject conflicting legacy options, then alias legacy keys
//! 4. resolve `rootDir`
//! 5. load the preset, if any, alias its legacy keys and merge it; the
//!    `preset` key itself is consumed so the output does not merge twice
//! 6. check `testMatch`/`testRegex`
//! 7. resolve environment, runner and reporter identities
//! 8. dispatch every option through its rule
//! 9. build the test path pattern
//! 10. narrow coverage to related files
//! 11. overlay onto the defaults and apply the fix-ups
//!
//! A fatal error at any stage aborts the run; nothing partial is returned.
//! Each call builds its own preset loader, so normalizing several project
//! configurations in one process shares no state between them.

mod aliases;
mod assembly;
mod dispatch;
mod identity;
mod invariants;
mod matcher;
mod pattern;

pub use matcher::{GlobPatternMatcher, PatternMatcher};
pub use pattern::{TestPathPattern, build_test_path_pattern, build_test_path_pattern_with};

use crate::argv::Argv;
use crate::config::NormalizedConfig;
use crate::{Error, Result};
use assembly::Assembly;
use jestconf_fs::tokens::replace_root_dir_in_path;
use jestconf_fs::{ModuleResolver, NodeResolver, NormalizedPath};
use jestconf_meta::defaults::RUNTIME_SETUP_MODULE;
use jestconf_meta::{OptionRegistry, OptionValidator, SchemaValidator, ValidationOutcome};
use jestconf_presets::{PresetLoader, merge_with_preset};
use serde::Serialize;
use serde_json::{Map, Value};

/// Side output of a normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationReport {
    /// Whether any deprecated option was used.
    pub has_deprecation_warnings: bool,
    /// One message per deprecated option encountered.
    pub deprecations: Vec<String>,
    /// Recoverable problems, such as an invalid test path pattern.
    pub warnings: Vec<String>,
}

impl From<ValidationOutcome> for NormalizationReport {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            has_deprecation_warnings: outcome.has_deprecation_warnings,
            deprecations: outcome.deprecations,
            warnings: Vec::new(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub config: NormalizedConfig,
    pub report: NormalizationReport,
}

impl Normalized {
    pub fn has_deprecation_warnings(&self) -> bool {
        self.report.has_deprecation_warnings
    }
}

/// Module resolution anchored at the project root.
pub(crate) struct Context<'a> {
    pub resolver: &'a dyn ModuleResolver,
    pub root_dir: &'a NormalizedPath,
}

impl Context<'_> {
    /// Resolve `specifier` from the root, as is.
    pub fn resolve(&self, specifier: &str) -> Option<String> {
        self.resolver
            .resolve(specifier, self.root_dir)
            .map(|path| path.as_str().to_string())
    }

    /// Substitute the root token and resolve; failure names `key`.
    pub fn require(&self, key: &str, specifier: &str) -> Result<String> {
        let specifier = replace_root_dir_in_path(self.root_dir, specifier);
        self.resolve(&specifier)
            .ok_or_else(|| Error::module_not_found(key, &specifier, self.root_dir.as_str()))
    }

    /// Substitute the root token and make the path absolute.
    pub fn path(&self, value: &str) -> String {
        let substituted = replace_root_dir_in_path(self.root_dir, value);
        self.root_dir.resolve(&substituted).as_str().to_string()
    }
}

/// Normalizes raw options into a [`NormalizedConfig`].
///
/// # Example
///
/// ```rust,no_run
/// use jestconf_core::{Argv, Normalizer};
/// use serde_json::json;
///
/// let options = json!({"rootDir": "/path/to/project", "bail": true});
/// let normalized = Normalizer::new()
///     .normalize(options.as_object().cloned().unwrap_or_default(), &Argv::new())?;
/// assert_eq!(normalized.config.bail(), 1);
/// # Ok::<(), jestconf_core::Error>(())
/// ```
pub struct Normalizer {
    resolver: Box<dyn ModuleResolver>,
    validator: Box<dyn OptionValidator>,
    matcher: Box<dyn PatternMatcher>,
    registry: OptionRegistry,
    config_path: Option<NormalizedPath>,
    project_index: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// A normalizer with the built-in collaborators.
    pub fn new() -> Self {
        Self {
            resolver: Box::new(NodeResolver::new()),
            validator: Box::new(SchemaValidator::new()),
            matcher: Box::new(GlobPatternMatcher::new()),
            registry: OptionRegistry::with_builtins(),
            config_path: None,
            project_index: 0,
        }
    }

    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_validator(mut self, validator: impl OptionValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_matcher(mut self, matcher: impl PatternMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Config file the options came from; feeds the derived `name`.
    pub fn with_config_path(mut self, path: NormalizedPath) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Position among sibling project configurations; feeds the derived
    /// `name`.
    pub fn with_project_index(mut self, index: usize) -> Self {
        self.project_index = index;
        self
    }

    /// Normalize `options` under the command-line overrides in `argv`.
    pub fn normalize(&self, options: Map<String, Value>, argv: &Argv) -> Result<Normalized> {
        let options = argv.apply_to(options);

        let outcome = self.validator.validate(&options, &self.registry)?;
        let mut report = NormalizationReport::from(outcome);

        invariants::check_legacy_pairs(&options)?;
        let mut options = aliases::apply(options);

        let root_dir = identity::resolve_root_dir(&options)?;
        options.insert("rootDir".into(), Value::String(root_dir.as_str().to_string()));
        tracing::debug!(%root_dir, "Resolved root directory");

        if let Some(Value::String(preset)) = options.remove("preset") {
            let loaded = PresetLoader::new(self.resolver.as_ref()).load(&root_dir, &preset)?;
            invariants::check_legacy_pairs(&loaded)?;
            let legacy = aliases::legacy_messages(&loaded);
            if !legacy.is_empty() {
                report.has_deprecation_warnings = true;
                report.deprecations.extend(legacy);
            }
            let loaded = aliases::apply(loaded);

            tracing::debug!(%preset, keys = loaded.len(), "Merging preset");
            options = merge_with_preset(options, loaded);
            // A preset naming another preset is not followed.
            options.remove("preset");
        }

        invariants::enforce_test_selection(&mut options)?;

        let ctx = Context {
            resolver: self.resolver.as_ref(),
            root_dir: &root_dir,
        };
        let default_compiler = identity::resolve_identities(&mut options, &ctx)?;

        let dispatched =
            dispatch::dispatch(&options, &self.registry, &ctx, argv.positional().to_vec())?;
        let mut normalized = dispatched.options;
        let positional = dispatched.positional;

        let built = build_test_path_pattern(&positional, &argv.strings("testPathPattern"));
        report.warnings.extend(built.warning);

        invariants::narrow_coverage_to_related(
            &mut normalized,
            argv,
            &positional,
            &root_dir,
            self.matcher.as_ref(),
        );

        let runtime_setup = if default_compiler {
            ctx.resolve(RUNTIME_SETUP_MODULE)
        } else {
            None
        };

        let assembled = Assembly {
            argv,
            root_dir: &root_dir,
            config_path: self.config_path.as_ref(),
            project_index: self.project_index,
            positional,
            test_path_pattern: built.pattern,
            runtime_setup,
            cpus: num_cpus::get(),
        }
        .assemble(normalized);

        tracing::debug!(options = assembled.len(), "Normalization complete");
        Ok(Normalized {
            config: NormalizedConfig::from_options(assembled),
            report,
        })
    }
}
