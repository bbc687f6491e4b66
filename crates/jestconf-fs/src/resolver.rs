//! Module reference resolution.
//!
//! [`ModuleResolver`] is the boundary the normalization pipeline resolves
//! every module reference through. [`NodeResolver`] is the built-in,
//! filesystem-backed implementation following Node's lookup order.

use crate::constants::{MODULE_EXTENSIONS, NODE_MODULES, PACKAGE_JSON};
use crate::{ConfigStore, NormalizedPath};
use serde_json::Value;

/// Turns a specifier into an absolute filesystem location.
pub trait ModuleResolver: Send + Sync {
    /// Resolve `specifier` relative to `base_dir`.
    fn resolve(&self, specifier: &str, base_dir: &NormalizedPath) -> Option<NormalizedPath>;

    /// Resolve with an explicit extension list.
    ///
    /// Resolvers without extension probing ignore `extensions`.
    fn resolve_with_extensions(
        &self,
        specifier: &str,
        base_dir: &NormalizedPath,
        extensions: &[&str],
    ) -> Option<NormalizedPath> {
        let _ = extensions;
        self.resolve(specifier, base_dir)
    }
}

/// Node-style resolver.
///
/// Path specifiers (absolute, `./`, `../`) are probed as a file, then with
/// each extension, then as a directory (`package.json` `main`, then
/// `index.<ext>`). Bare specifiers are looked up in `node_modules` of the
/// base directory and each of its ancestors. Hits are canonicalized so
/// symlinked and short-form aliases collapse to one path.
#[derive(Debug, Clone)]
pub struct NodeResolver {
    extensions: Vec<String>,
}

impl NodeResolver {
    pub fn new() -> Self {
        Self {
            extensions: MODULE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the default extension list.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    fn is_path_specifier(specifier: &str) -> bool {
        specifier == "."
            || specifier == ".."
            || specifier.starts_with("./")
            || specifier.starts_with("../")
            || specifier.starts_with(".\\")
            || specifier.starts_with("..\\")
            || NormalizedPath::new(specifier).is_absolute()
    }

    fn lookup(
        &self,
        specifier: &str,
        base_dir: &NormalizedPath,
        extensions: &[&str],
    ) -> Option<NormalizedPath> {
        if specifier.is_empty() {
            return None;
        }

        if Self::is_path_specifier(specifier) {
            let candidate = base_dir.resolve(specifier);
            return try_file(&candidate, extensions).or_else(|| try_dir(&candidate, extensions));
        }

        let mut dir = Some(base_dir.clone());
        while let Some(current) = dir {
            if current.file_name() != Some(NODE_MODULES) {
                let candidate = current.join(NODE_MODULES).join(specifier);
                if let Some(found) =
                    try_file(&candidate, extensions).or_else(|| try_dir(&candidate, extensions))
                {
                    return Some(found);
                }
            }
            dir = current.parent();
        }
        None
    }
}

impl Default for NodeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleResolver for NodeResolver {
    fn resolve(&self, specifier: &str, base_dir: &NormalizedPath) -> Option<NormalizedPath> {
        let extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        self.resolve_with_extensions(specifier, base_dir, &extensions)
    }

    fn resolve_with_extensions(
        &self,
        specifier: &str,
        base_dir: &NormalizedPath,
        extensions: &[&str],
    ) -> Option<NormalizedPath> {
        let found = self.lookup(specifier, base_dir, extensions)?;
        tracing::trace!(%specifier, %base_dir, %found, "Resolved module");
        Some(found.canonicalize())
    }
}

fn try_file(candidate: &NormalizedPath, extensions: &[&str]) -> Option<NormalizedPath> {
    if candidate.is_file() {
        return Some(candidate.clone());
    }
    extensions
        .iter()
        .map(|ext| NormalizedPath::new(format!("{}.{}", candidate.as_str(), ext)))
        .find(NormalizedPath::is_file)
}

fn try_dir(candidate: &NormalizedPath, extensions: &[&str]) -> Option<NormalizedPath> {
    if !candidate.is_dir() {
        return None;
    }

    let manifest = candidate.join(PACKAGE_JSON);
    if manifest.is_file() {
        match ConfigStore::new().load::<Value>(&manifest) {
            Ok(package) => {
                if let Some(main) = package.get("main").and_then(Value::as_str) {
                    let entry = candidate.join(main);
                    if let Some(found) = try_file(&entry, extensions) {
                        return Some(found);
                    }
                    if let Some(found) = try_index(&entry, extensions) {
                        return Some(found);
                    }
                }
            }
            Err(e) => tracing::debug!(%manifest, error = %e, "Ignoring unreadable package manifest"),
        }
    }

    try_index(candidate, extensions)
}

fn try_index(dir: &NormalizedPath, extensions: &[&str]) -> Option<NormalizedPath> {
    extensions
        .iter()
        .map(|ext| dir.join(&format!("index.{ext}")))
        .find(NormalizedPath::is_file)
}
