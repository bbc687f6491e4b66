//! `<rootDir>` token substitution and separator conversion
//!
//! Path-valued options are resolved through [`replace_root_dir_in_path`];
//! pattern-valued options keep their pattern syntax and only get the root
//! directory spliced in, then have separators converted for the engine that
//! will consume them (glob or regex).

use crate::constants::ROOT_DIR_TOKEN;
use crate::NormalizedPath;
use serde_json::Value;

/// Characters that carry meaning in a glob and must be escaped in literal paths.
const GLOB_SPECIAL: &[char] = &['(', ')', '*', '{', '}', '[', ']', '!', '?', '\\'];

/// Characters a backslash may escape inside a glob without being a separator.
const GLOB_ESCAPABLE: &[char] = &['{', '}', '(', ')', '+', '?', '.', '^', '$'];

/// Characters a backslash may escape inside a regex without being a separator.
const REGEX_ESCAPABLE: &[char] = &[
    '[', ']', '{', '}', '(', ')', '*', '+', '?', '.', '^', '$', '|', '\\',
];

/// Replace a leading `<rootDir>` token with the root directory.
///
/// The remainder after the token is normalized as a relative path, so
/// `<rootDir>/a/../b/` and `<rootDir>b` both land on `<root>/b`. Values not
/// starting with the token are returned untouched.
pub fn replace_root_dir_in_path(root_dir: &NormalizedPath, value: &str) -> String {
    match value.strip_prefix(ROOT_DIR_TOKEN) {
        Some(rest) => root_dir.join(&format!("./{rest}")).as_str().to_string(),
        None => value.to_string(),
    }
}

/// Replace `<rootDir>` tokens inside an arbitrary JSON value.
///
/// Strings are substituted via [`replace_root_dir_in_path`]; arrays and
/// objects are walked recursively. Other values are cloned.
pub fn replace_root_dir_tags(root_dir: &NormalizedPath, value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(replace_root_dir_in_path(root_dir, s)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| replace_root_dir_tags(root_dir, item))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), replace_root_dir_tags(root_dir, v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Replace a leading `<rootDir>` token in a glob with the escaped root.
///
/// Only the root segment is escaped; glob syntax in the remainder is kept.
pub fn replace_root_dir_in_glob(root_dir: &NormalizedPath, value: &str) -> String {
    let Some(rest) = value.strip_prefix(ROOT_DIR_TOKEN) else {
        return value.to_string();
    };

    let escaped_root = escape_glob_characters(root_dir.as_str());
    let rest = rest.replace('\\', "/");
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        escaped_root
    } else if escaped_root.ends_with('/') {
        format!("{escaped_root}{rest}")
    } else {
        format!("{escaped_root}/{rest}")
    }
}

/// Replace every `<rootDir>` occurrence in a regex source with the root,
/// escaped so it matches literally.
pub fn replace_root_dir_in_regex(root_dir: &NormalizedPath, pattern: &str) -> String {
    pattern.replace(ROOT_DIR_TOKEN, &regex::escape(root_dir.as_str()))
}

/// Backslash-escape glob metacharacters in a literal path.
pub fn escape_glob_characters(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if GLOB_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert backslash separators to `/` for the glob engine.
///
/// A backslash that escapes a glob metacharacter is kept as an escape.
pub fn replace_path_sep_for_glob(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && !chars.peek().is_some_and(|next| GLOB_ESCAPABLE.contains(next)) {
            out.push('/');
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert `/` separators to the platform form expected by the regex engine.
pub fn replace_path_sep_for_regex(pattern: &str) -> String {
    replace_path_sep_for_regex_with(pattern, std::path::MAIN_SEPARATOR)
}

/// Separator conversion for an explicit platform separator.
///
/// With `/` this is the identity. With `\` every `/` and every lone
/// backslash becomes an escaped backslash, while escape pairs such as `\.`
/// survive untouched.
pub fn replace_path_sep_for_regex_with(pattern: &str, separator: char) -> String {
    if separator == '/' {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '/' => out.push_str("\\\\"),
            '\\' => match chars.peek().copied() {
                Some(next) if REGEX_ESCAPABLE.contains(&next) => {
                    out.push('\\');
                    out.push(next);
                    chars.next();
                }
                _ => out.push_str("\\\\"),
            },
            other => out.push(other),
        }
    }
    out
}
