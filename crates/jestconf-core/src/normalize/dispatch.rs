//! Per-option normalization.
//!
//! Each option key maps to a [`Rule`] in the option registry; this module
//! holds one handler per rule category and one per structural option.
//! Unknown keys pass through untouched.

use super::Context;
use super::identity::resolve_prefixed;
use crate::{Error, Result};
use jestconf_fs::ModulePrefix;
use jestconf_fs::constants::ROOT_DIR_TOKEN;
use jestconf_fs::tokens::{
    replace_path_sep_for_glob, replace_path_sep_for_regex, replace_root_dir_in_glob,
    replace_root_dir_in_path, replace_root_dir_in_regex, replace_root_dir_tags,
};
use jestconf_meta::defaults::REQUIRED_MODULE_EXTENSION;
use jestconf_meta::{OptionRegistry, Presence, Rule, Structural};
use serde_json::{Map, Value, json};

/// Options after dispatch, plus positional arguments grown by rules with
/// side effects on test selection.
#[derive(Debug)]
pub(crate) struct Dispatched {
    pub options: Map<String, Value>,
    pub positional: Vec<String>,
}

/// Run every option through its rule.
///
/// Null values count as unset and are skipped so the default applies.
pub(crate) fn dispatch(
    options: &Map<String, Value>,
    registry: &OptionRegistry,
    ctx: &Context<'_>,
    positional: Vec<String>,
) -> Result<Dispatched> {
    let mut dispatched = Dispatched {
        options: Map::new(),
        positional,
    };

    for (key, value) in options {
        let rule = registry.rule_for(key).unwrap_or(Rule::PassThrough);
        if matches!(rule, Rule::Computed | Rule::Legacy) || value.is_null() {
            continue;
        }

        let normalized = match rule {
            Rule::PassThrough | Rule::Computed | Rule::Legacy => value.clone(),
            Rule::Path => map_string(value, |s| Ok(ctx.path(s)))?,
            Rule::PathList => map_strings(value, |s| Ok(ctx.path(s)))?,
            Rule::Module(Presence::Required) => map_string(value, |s| ctx.require(key, s))?,
            Rule::Module(Presence::Optional) => match value.as_str() {
                Some(s) => optional_module(ctx, key, s),
                None => value.clone(),
            },
            Rule::ModuleList => map_strings(value, |s| ctx.require(key, s))?,
            Rule::RegexPatterns => map_strings(value, |s| {
                Ok(replace_path_sep_for_regex(&replace_root_dir_in_regex(
                    ctx.root_dir,
                    s,
                )))
            })?,
            Rule::GlobPatterns => map_strings(value, |s| {
                Ok(replace_path_sep_for_glob(&replace_root_dir_in_glob(
                    ctx.root_dir,
                    s,
                )))
            })?,
            Rule::Structural(kind) => structural(kind, key, value, ctx, &mut dispatched.positional)?,
        };

        dispatched.options.insert(key.clone(), normalized);
    }

    tracing::debug!(options = dispatched.options.len(), "Dispatched options");
    Ok(dispatched)
}

fn structural(
    kind: Structural,
    key: &str,
    value: &Value,
    ctx: &Context<'_>,
    positional: &mut Vec<String>,
) -> Result<Value> {
    match kind {
        Structural::Bail => Ok(bail(value, positional)),
        Structural::CollectCoverageFrom => Ok(collect_coverage_from(value)),
        Structural::CollectCoverageOnlyFrom => Ok(collect_coverage_only_from(value, ctx)),
        Structural::Haste => haste(value, ctx),
        Structural::Integer => integer(key, value),
        Structural::ModuleFileExtensions => module_file_extensions(value),
        Structural::ModuleNameMapper => Ok(module_name_mapper(value, ctx)),
        Structural::Projects => Ok(projects(value, ctx)),
        Structural::TestRegex => Ok(test_regex(value)),
        Structural::TestTimeout => test_timeout(value),
        Structural::Transform => transform(value, ctx),
        Structural::WatchPlugins => watch_plugins(value, ctx),
    }
}

/// `true`/`false` become `1`/`0`. A string bails after the first failure
/// and also selects tests, as if it had been passed positionally.
fn bail(value: &Value, positional: &mut Vec<String>) -> Value {
    match value {
        Value::Bool(b) => json!(u64::from(*b)),
        Value::String(s) => {
            positional.push(s.clone());
            json!(1)
        }
        other => other.clone(),
    }
}

fn collect_coverage_from(value: &Value) -> Value {
    let entries = match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => vec![value.clone()],
        },
        Value::Array(items) => items.clone(),
        other => return other.clone(),
    };

    Value::Array(
        entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(s) => Value::String(strip_root_prefix(&s)),
                other => other,
            })
            .collect(),
    )
}

/// `<rootDir>/src/**` becomes `src/**`; a leading `!` is kept.
fn strip_root_prefix(pattern: &str) -> String {
    let (negation, rest) = match pattern.strip_prefix('!') {
        Some(rest) => ("!", rest),
        None => ("", pattern),
    };
    match rest
        .strip_prefix(ROOT_DIR_TOKEN)
        .and_then(|r| r.strip_prefix('/'))
    {
        Some(relative) => format!("{negation}{relative}"),
        None => pattern.to_string(),
    }
}

fn collect_coverage_only_from(value: &Value, ctx: &Context<'_>) -> Value {
    let paths: Vec<&str> = match value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::Object(table) => table.keys().map(String::as_str).collect(),
        other => return other.clone(),
    };
    Value::Object(
        paths
            .into_iter()
            .map(|path| (ctx.path(path), Value::Bool(true)))
            .collect(),
    )
}

fn haste(value: &Value, ctx: &Context<'_>) -> Result<Value> {
    let mut haste = value.clone();
    if let Some(table) = haste.as_object_mut() {
        if let Some(implementation) = table.get("hasteImplModulePath").and_then(Value::as_str) {
            let resolved = ctx.require("haste.hasteImplModulePath", implementation)?;
            table.insert("hasteImplModulePath".into(), Value::String(resolved));
        }
    }
    Ok(haste)
}

fn integer(key: &str, value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| json!(n))
            .map_err(|_| Error::invalid_option(key, format!("must be an integer, received \"{s}\"."))),
        other => Ok(other.clone()),
    }
}

fn module_file_extensions(value: &Value) -> Result<Value> {
    let Some(extensions) = value.as_array() else {
        return Ok(value.clone());
    };
    if extensions
        .iter()
        .any(|ext| ext.as_str() == Some(REQUIRED_MODULE_EXTENSION))
    {
        return Ok(value.clone());
    }
    let received = extensions
        .iter()
        .map(|ext| ext.as_str().map(str::to_string).unwrap_or_else(|| ext.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::ModuleFileExtensionsMissingJs {
        received: format!("[{received}]"),
    })
}

/// Table to `[pattern, replacement]` entries; only the replacement gets
/// token substitution and empty replacements are dropped.
fn module_name_mapper(value: &Value, ctx: &Context<'_>) -> Value {
    let Some(table) = value.as_object() else {
        return value.clone();
    };
    Value::Array(
        table
            .iter()
            .filter(|(_, replacement)| crate::argv::is_truthy(replacement))
            .map(|(pattern, replacement)| {
                json!([pattern, replace_root_dir_tags(ctx.root_dir, replacement)])
            })
            .collect(),
    )
}

/// String entries that glob-expand to existing paths are replaced by the
/// matches; the rest stay literal for later resolution.
fn projects(value: &Value, ctx: &Context<'_>) -> Value {
    let Some(entries) = value.as_array() else {
        return value.clone();
    };

    let mut expanded = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::String(project) = entry else {
            expanded.push(entry.clone());
            continue;
        };

        let project = replace_root_dir_in_path(ctx.root_dir, project);
        let pattern = project_glob(ctx, &project);
        let matches: Vec<Value> = match glob::glob(&pattern) {
            Ok(paths) => paths
                .filter_map(std::result::Result::ok)
                .map(|p| Value::String(jestconf_fs::NormalizedPath::new(p).as_str().to_string()))
                .collect(),
            Err(e) => {
                tracing::debug!(%project, error = %e, "Project is not a glob; keeping it literal");
                Vec::new()
            }
        };

        if matches.is_empty() {
            expanded.push(Value::String(project));
        } else {
            expanded.extend(matches);
        }
    }
    Value::Array(expanded)
}

/// The project entry as a glob, with the root directory matched literally.
fn project_glob(ctx: &Context<'_>, project: &str) -> String {
    let resolved = ctx.root_dir.resolve(project);
    let root = ctx.root_dir.as_str();
    match resolved.as_str().strip_prefix(root) {
        Some(rest) => format!("{}{rest}", glob::Pattern::escape(root)),
        None => resolved.as_str().to_string(),
    }
}

fn test_regex(value: &Value) -> Value {
    let patterns = match value {
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        other => return other.clone(),
    };
    Value::Array(
        patterns
            .into_iter()
            .map(|p| Value::String(replace_path_sep_for_regex(p)))
            .collect(),
    )
}

fn test_timeout(value: &Value) -> Result<Value> {
    match value.as_f64() {
        Some(ms) if ms >= 0.0 => Ok(value.clone()),
        _ => Err(Error::invalid_option("testTimeout", "must be a natural number.")),
    }
}

/// Table to `[pattern, compiler, options]` entries with each compiler
/// module-resolved. Patterns stay regex source.
fn transform(value: &Value, ctx: &Context<'_>) -> Result<Value> {
    let Some(table) = value.as_object() else {
        return Ok(value.clone());
    };

    let mut entries = Vec::with_capacity(table.len());
    for (pattern, target) in table {
        let (module, options) = match target {
            Value::String(module) => (module.as_str(), Value::Object(Map::new())),
            Value::Array(pair) => match pair.first().and_then(Value::as_str) {
                Some(module) => (
                    module,
                    pair.get(1).cloned().unwrap_or_else(|| Value::Object(Map::new())),
                ),
                None => return Err(invalid_transform()),
            },
            _ => return Err(invalid_transform()),
        };
        let path = ctx.require("transform", module)?;
        entries.push(json!([pattern, path, options]));
    }
    Ok(Value::Array(entries))
}

fn invalid_transform() -> Error {
    Error::invalid_option(
        "transform",
        "values must be a module name or a [module, options] pair.",
    )
}

fn watch_plugins(value: &Value, ctx: &Context<'_>) -> Result<Value> {
    let Some(plugins) = value.as_array() else {
        return Ok(value.clone());
    };

    plugins
        .iter()
        .map(|plugin| {
            let (name, config) = match plugin {
                Value::String(name) => (name.as_str(), Value::Object(Map::new())),
                Value::Array(pair) => match pair.first().and_then(Value::as_str) {
                    Some(name) => (
                        name,
                        pair.get(1).cloned().unwrap_or_else(|| Value::Object(Map::new())),
                    ),
                    None => return Err(invalid_watch_plugin()),
                },
                _ => return Err(invalid_watch_plugin()),
            };
            let path = resolve_prefixed(ctx, ModulePrefix::WatchPlugin, name).ok_or_else(|| {
                Error::WatchPluginNotFound {
                    name: name.to_string(),
                }
            })?;
            Ok(json!({"config": config, "path": path}))
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn invalid_watch_plugin() -> Error {
    Error::invalid_option(
        "watchPlugins",
        "entries must be a name or a [name, options] pair.",
    )
}

/// Resolve an optional module; unresolvable means unset.
fn optional_module(ctx: &Context<'_>, key: &str, specifier: &str) -> Value {
    let specifier = replace_root_dir_in_path(ctx.root_dir, specifier);
    match ctx.resolve(&specifier) {
        Some(path) => Value::String(path),
        None => {
            tracing::debug!(option = %key, %specifier, "Optional module not found; leaving it unset");
            Value::Null
        }
    }
}

fn map_string(value: &Value, f: impl Fn(&str) -> Result<String>) -> Result<Value> {
    match value {
        Value::String(s) => f(s).map(Value::String),
        other => Ok(other.clone()),
    }
}

fn map_strings(value: &Value, f: impl Fn(&str) -> Result<String>) -> Result<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| map_string(item, &f))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}
