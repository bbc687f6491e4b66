//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Construction lexically cleans the path: repeated separators collapse,
/// `.` segments vanish, `..` segments pop their parent where one exists and
/// trailing separators are dropped. A leading `//` (UNC/network) prefix is
/// preserved. The platform-native form is produced only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is anchored at a filesystem root, drive or share.
    pub fn is_absolute(&self) -> bool {
        split_prefix(&self.inner).0.is_some()
    }

    /// Join this path with a segment.
    ///
    /// The segment is always appended, even when it looks absolute.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Resolve `value` against this path.
    ///
    /// An absolute `value` replaces the base entirely; a relative one is
    /// joined onto it.
    pub fn resolve(&self, value: &str) -> Self {
        let candidate = Self::new(value);
        if candidate.is_absolute() {
            candidate
        } else {
            self.join(value)
        }
    }

    /// Express this path relative to `base`.
    ///
    /// Both paths are compared segment-wise; the result climbs out of `base`
    /// with `..` segments where needed. Returns `None` when the two paths
    /// live under different roots.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<String> {
        let (own_prefix, own_rest) = split_prefix(&self.inner);
        let (base_prefix, base_rest) = split_prefix(&base.inner);
        if own_prefix != base_prefix {
            return None;
        }

        let own: Vec<&str> = own_rest.split('/').filter(|s| !s.is_empty()).collect();
        let other: Vec<&str> = base_rest.split('/').filter(|s| !s.is_empty()).collect();
        let common = own
            .iter()
            .zip(other.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = std::iter::repeat_n("..", other.len() - common).collect();
        parts.extend_from_slice(&own[common..]);
        Some(parts.join("/"))
    }

    /// Resolve symbolic links and short-form aliases when the path exists.
    ///
    /// Falls back to the lexical form when the path cannot be canonicalized.
    pub fn canonicalize(&self) -> Self {
        match dunce::canonicalize(self.to_native()) {
            Ok(real) => Self::new(real),
            Err(e) => {
                tracing::trace!(path = %self, error = %e, "Keeping lexical path");
                self.clone()
            }
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Split a forward-slash path into its root prefix and the remainder.
///
/// The prefix is `//` for network shares, `X:/` for drive paths and `/` for
/// POSIX roots; relative paths have no prefix.
fn split_prefix(path: &str) -> (Option<&str>, &str) {
    let bytes = path.as_bytes();
    if path.starts_with("//") && !path.starts_with("///") {
        return (Some("//"), &path[2..]);
    }
    if path.starts_with('/') {
        return (Some("/"), path.trim_start_matches('/'));
    }
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = path[2..].trim_start_matches('/');
        return (Some(&path[..2]), rest);
    }
    (None, path)
}

fn clean(path: &str) -> String {
    let (prefix, rest) = split_prefix(path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if prefix.is_some() => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    if prefix.is_none() && split_prefix(&body).0.is_some() {
        // `a/../C:` collapses into something that now reads as a drive.
        return clean(&body);
    }
    match prefix {
        Some("//") => format!("//{body}"),
        Some("/") => format!("/{body}"),
        Some(drive) => format!("{drive}/{body}"),
        None if body.is_empty() => ".".to_string(),
        None => body,
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_dot_segments() {
        assert_eq!(clean("/a/./b/../c"), "/a/c");
        assert_eq!(clean("a//b/"), "a/b");
        assert_eq!(clean("../a"), "../a");
        assert_eq!(clean(""), ".");
    }

    #[test]
    fn clean_does_not_climb_above_root() {
        assert_eq!(clean("/../a"), "/a");
        assert_eq!(clean("C:/../a"), "C:/a");
    }

    #[test]
    fn clean_preserves_network_prefix() {
        assert_eq!(clean("//server/share/x"), "//server/share/x");
    }
}
