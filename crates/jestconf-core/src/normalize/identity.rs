//! Root directory and module identity resolution.
//!
//! Runs after presets are merged and before the dispatch table, so every
//! later stage sees a canonical root and resolved environment, runner and
//! reporter modules.

use super::Context;
use crate::{Error, Result};
use jestconf_fs::tokens::replace_root_dir_in_path;
use jestconf_fs::{ModulePrefix, NormalizedPath};
use jestconf_meta::defaults::{
    BUILTIN_REPORTERS, DEFAULT_COMPILER, DEFAULT_JS_PATTERN, DEFAULT_RUNNER,
    DEFAULT_TEST_ENVIRONMENT, DEFAULT_TEST_RUNNER, DEFAULT_TEST_RUNNER_MODULE,
};
use regex::Regex;
use serde_json::{Map, Value};

/// File names a transform pattern must match to count as the JavaScript
/// or TypeScript compiler entry.
const SCRIPT_PROBES: &[&str] = &["a.js", "a.jsx", "a.ts", "a.tsx"];

/// Normalize `rootDir` into an absolute, canonical path.
///
/// Symlinks and short-form aliases are resolved when the directory exists
/// so two spellings of one directory cannot produce diverging paths.
pub(crate) fn resolve_root_dir(options: &Map<String, Value>) -> Result<NormalizedPath> {
    let raw = options
        .get("rootDir")
        .and_then(Value::as_str)
        .filter(|root| !root.is_empty())
        .ok_or(Error::MissingRootDir)?;

    let mut root = NormalizedPath::new(raw);
    if !root.is_absolute() {
        let cwd = std::env::current_dir().map_err(|e| jestconf_fs::Error::io(".", e))?;
        root = NormalizedPath::new(cwd).resolve(raw);
    }
    Ok(root.canonicalize())
}

/// Resolve the modules identified by name rather than path, and fill in
/// the root-derived defaults.
///
/// Returns whether the default compiler is in effect.
pub(crate) fn resolve_identities(options: &mut Map<String, Value>, ctx: &Context<'_>) -> Result<bool> {
    if let Some(resolver) = options.get("resolver").and_then(Value::as_str) {
        let resolved = ctx.require("resolver", resolver)?;
        options.insert("resolver".into(), Value::String(resolved));
    }

    let environment = options
        .get("testEnvironment")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TEST_ENVIRONMENT);
    let environment = resolve_prefixed(ctx, ModulePrefix::Environment, environment)
        .ok_or_else(|| Error::TestEnvironmentNotFound {
            name: environment.to_string(),
        })?;
    options.insert("testEnvironment".into(), Value::String(environment));

    let runner_name = options
        .get("testRunner")
        .and_then(Value::as_str)
        .filter(|name| *name != DEFAULT_TEST_RUNNER)
        .unwrap_or(DEFAULT_TEST_RUNNER_MODULE);
    let test_runner = ctx.require("testRunner", runner_name)?;
    options.insert("testRunner".into(), Value::String(test_runner));

    if let Some(runner) = options
        .get("runner")
        .and_then(Value::as_str)
        .filter(|name| *name != DEFAULT_RUNNER)
    {
        let resolved = resolve_prefixed(ctx, ModulePrefix::Runner, runner).ok_or_else(|| {
            Error::RunnerNotFound {
                name: runner.to_string(),
            }
        })?;
        options.insert("runner".into(), Value::String(resolved));
    }

    if let Some(reporters) = options.get("reporters").and_then(Value::as_array) {
        let normalized = normalize_reporters(reporters, ctx)?;
        options.insert("reporters".into(), Value::Array(normalized));
    }

    if options.get("roots").is_none_or(Value::is_null) {
        options.insert(
            "roots".into(),
            Value::Array(vec![Value::String(ctx.root_dir.as_str().to_string())]),
        );
    }

    if options
        .get("coverageDirectory")
        .and_then(Value::as_str)
        .is_none_or(str::is_empty)
    {
        options.insert(
            "coverageDirectory".into(),
            Value::String(ctx.root_dir.join("coverage").as_str().to_string()),
        );
    }

    Ok(apply_default_compiler(options, ctx))
}

/// Try `<prefix><name>` first, then `name` as given.
pub(crate) fn resolve_prefixed(ctx: &Context<'_>, prefix: ModulePrefix, name: &str) -> Option<String> {
    let name = replace_root_dir_in_path(ctx.root_dir, name);
    prefix
        .candidates(&name)
        .iter()
        .find_map(|candidate| ctx.resolve(candidate))
}

fn normalize_reporters(reporters: &[Value], ctx: &Context<'_>) -> Result<Vec<Value>> {
    reporters
        .iter()
        .map(|reporter| {
            let (name, options) = match reporter {
                Value::String(name) => (name.as_str(), Value::Object(Map::new())),
                Value::Array(pair) => match pair.first().and_then(Value::as_str) {
                    Some(name) => (
                        name,
                        pair.get(1).cloned().unwrap_or_else(|| Value::Object(Map::new())),
                    ),
                    None => {
                        return Err(Error::invalid_option(
                            "reporters",
                            "entries must be a name or a [name, options] pair.",
                        ));
                    }
                },
                _ => {
                    return Err(Error::invalid_option(
                        "reporters",
                        "entries must be a name or a [name, options] pair.",
                    ));
                }
            };

            let path = if BUILTIN_REPORTERS.contains(&name) {
                name.to_string()
            } else {
                let specifier = replace_root_dir_in_path(ctx.root_dir, name);
                ctx.resolve(&specifier).ok_or_else(|| Error::ReporterNotFound {
                    path: specifier.clone(),
                })?
            };
            Ok(Value::Array(vec![Value::String(path), options]))
        })
        .collect()
}

/// Install or detect the default compiler.
///
/// Without a `transform`, the default compiler is wired to the JavaScript
/// pattern when it is installed. With one, an entry for scripts naming the
/// default compiler by its bare name counts too.
fn apply_default_compiler(options: &mut Map<String, Value>, ctx: &Context<'_>) -> bool {
    match options.get("transform") {
        None | Some(Value::Null) => {
            let Some(compiler) = ctx.resolve(DEFAULT_COMPILER) else {
                tracing::debug!("Default compiler not installed; leaving transform empty");
                return false;
            };
            let mut table = Map::new();
            table.insert(DEFAULT_JS_PATTERN.to_string(), Value::String(compiler));
            options.insert("transform".into(), Value::Object(table));
            true
        }
        Some(Value::Object(table)) => table.iter().any(|(pattern, target)| {
            names_default_compiler(target) && matches_scripts(pattern)
        }),
        Some(_) => false,
    }
}

fn names_default_compiler(target: &Value) -> bool {
    match target {
        Value::String(name) => name == DEFAULT_COMPILER,
        Value::Array(pair) => pair.first().and_then(Value::as_str) == Some(DEFAULT_COMPILER),
        _ => false,
    }
}

fn matches_scripts(pattern: &str) -> bool {
    Regex::new(pattern).is_ok_and(|re| SCRIPT_PROBES.iter().any(|probe| re.is_match(probe)))
}
