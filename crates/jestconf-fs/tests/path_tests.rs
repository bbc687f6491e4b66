use jestconf_fs::NormalizedPath;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_drops_trailing_separator() {
    let path = NormalizedPath::new("/root/project/");
    assert_eq!(path.as_str(), "/root/project");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    let joined = base.join("baz");
    assert_eq!(joined.as_str(), "foo/bar/baz");
}

#[test]
fn test_resolve_relative_against_base() {
    let base = NormalizedPath::new("/root/project");
    assert_eq!(base.resolve("src/../lib").as_str(), "/root/project/lib");
}

#[test]
fn test_resolve_absolute_replaces_base() {
    let base = NormalizedPath::new("/root/project");
    assert_eq!(base.resolve("/elsewhere/x").as_str(), "/elsewhere/x");
}

#[test]
fn test_resolve_drive_path_is_absolute() {
    let base = NormalizedPath::new("/root/project");
    assert_eq!(base.resolve("C:\\work\\x").as_str(), "C:/work/x");
}

#[test]
fn test_relative_to_descendant() {
    let base = NormalizedPath::new("/root/project");
    let file = NormalizedPath::new("/root/project/src/a.js");
    assert_eq!(file.relative_to(&base).as_deref(), Some("src/a.js"));
}

#[test]
fn test_relative_to_sibling() {
    let base = NormalizedPath::new("/root/project");
    let file = NormalizedPath::new("/root/other/a.js");
    assert_eq!(file.relative_to(&base).as_deref(), Some("../other/a.js"));
}

#[test]
fn test_relative_to_different_roots() {
    let base = NormalizedPath::new("/root/project");
    let file = NormalizedPath::new("relative/a.js");
    assert_eq!(file.relative_to(&base), None);
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "foo/bar");
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("foo/bar/baz.test.json");
    assert_eq!(path.file_name(), Some("baz.test.json"));
    assert_eq!(path.extension(), Some("json"));
}

#[test]
fn test_canonicalize_nonexistent_keeps_lexical_form() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
    assert_eq!(path.canonicalize(), path);
}

#[cfg(unix)]
#[test]
fn test_canonicalize_resolves_symlinks() {
    let temp = tempfile::TempDir::new().unwrap();
    let real = temp.path().join("real");
    std::fs::create_dir(&real).unwrap();
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let via_link = NormalizedPath::new(&link).canonicalize();
    let direct = NormalizedPath::new(&real).canonicalize();
    assert_eq!(via_link, direct);
}
