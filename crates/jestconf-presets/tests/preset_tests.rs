//! Preset loading against on-disk project trees.

use jestconf_fs::{NodeResolver, NormalizedPath};
use jestconf_presets::{Error, PresetLoader, merge_with_preset};
use jestconf_test_utils::TestProject;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn root_of(project: &TestProject) -> NormalizedPath {
    NormalizedPath::new(project.root())
}

#[test]
fn loads_package_preset_from_node_modules() {
    let project = TestProject::new();
    project.add_preset("react-native", &json!({"testEnvironment": "node"}));
    let resolver = NodeResolver::new();

    let preset = PresetLoader::new(&resolver)
        .load(&root_of(&project), "react-native")
        .unwrap();

    assert_eq!(preset.get("testEnvironment"), Some(&json!("node")));
}

#[rstest]
#[case("./presets/local")]
#[case("./presets/local.json")]
fn loads_relative_preset_file(#[case] specifier: &str) {
    let project = TestProject::new();
    project.write_json("presets/local.json", &json!({"verbose": true}));
    let resolver = NodeResolver::new();

    let preset = PresetLoader::new(&resolver)
        .load(&root_of(&project), specifier)
        .unwrap();

    assert_eq!(preset.get("verbose"), Some(&json!(true)));
}

#[test]
fn rooted_preset_names_a_directory_holding_jest_preset() {
    let project = TestProject::new();
    project.write_json("presets/team/jest-preset.json", &json!({"bail": 1}));
    let resolver = NodeResolver::new();

    let preset = PresetLoader::new(&resolver)
        .load(&root_of(&project), "<rootDir>/presets/team")
        .unwrap();

    assert_eq!(preset.get("bail"), Some(&json!(1)));
}

#[test]
fn loads_yaml_preset() {
    let project = TestProject::new();
    project.add_module("yaml-preset");
    project.write("node_modules/yaml-preset/jest-preset.yaml", "bail: 2\n");
    let resolver = NodeResolver::new();

    let preset = PresetLoader::new(&resolver)
        .load(&root_of(&project), "yaml-preset")
        .unwrap();

    assert_eq!(preset.get("bail"), Some(&json!(2)));
}

#[test]
fn missing_package_is_not_found() {
    let project = TestProject::new();
    let resolver = NodeResolver::new();

    let err = PresetLoader::new(&resolver)
        .load(&root_of(&project), "does-not-exist")
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { ref preset } if preset == "does-not-exist"));
    assert_eq!(err.to_string(), "Preset does-not-exist not found.");
}

#[test]
fn package_without_preset_file_is_reported() {
    let project = TestProject::new();
    project.add_module("bare-package");
    let resolver = NodeResolver::new();

    let err = PresetLoader::new(&resolver)
        .load(&root_of(&project), "bare-package")
        .unwrap_err();

    assert!(matches!(err, Error::MissingPresetFile { .. }));
    assert_eq!(
        err.to_string(),
        "Module bare-package should have a jest-preset file (.json, .yaml, .yml or .toml) at the root."
    );
}

#[test]
fn unparseable_preset_is_invalid() {
    let project = TestProject::new();
    project.add_module("broken");
    project.write("node_modules/broken/jest-preset.json", "{ not json");
    let resolver = NodeResolver::new();

    let err = PresetLoader::new(&resolver)
        .load(&root_of(&project), "broken")
        .unwrap_err();

    assert!(matches!(err, Error::Invalid { .. }));
    assert!(err.to_string().starts_with("Preset broken is invalid:"));
}

#[test]
fn non_object_preset_is_invalid() {
    let project = TestProject::new();
    project.add_preset("listy", &json!(["a", "b"]));
    let resolver = NodeResolver::new();

    let err = PresetLoader::new(&resolver)
        .load(&root_of(&project), "listy")
        .unwrap_err();

    assert!(matches!(err, Error::Invalid { .. }));
}

#[test]
fn every_load_reads_fresh_content() {
    let project = TestProject::new();
    project.add_preset("changing", &json!({"verbose": true}));
    let resolver = NodeResolver::new();
    let loader = PresetLoader::new(&resolver);
    let root = root_of(&project);

    let first = loader.load(&root, "changing").unwrap();
    project.write_json(
        "node_modules/changing/jest-preset.json",
        &json!({"verbose": false}),
    );
    let second = loader.load(&root, "changing").unwrap();

    assert_eq!(first.get("verbose"), Some(&json!(true)));
    assert_eq!(second.get("verbose"), Some(&json!(false)));
}

#[test]
fn loaded_preset_merges_beneath_user_options() {
    let project = TestProject::new();
    project.add_preset(
        "team",
        &json!({
            "setupFiles": ["<rootDir>/preset-setup.js"],
            "moduleNameMapper": {"^a$": "preset-a", "^b$": "preset-b"},
            "verbose": true
        }),
    );
    let resolver = NodeResolver::new();
    let preset = PresetLoader::new(&resolver)
        .load(&root_of(&project), "team")
        .unwrap();

    let user = json!({
        "setupFiles": ["<rootDir>/user-setup.js"],
        "moduleNameMapper": {"^b$": "user-b"},
        "verbose": false
    });
    let merged = merge_with_preset(user.as_object().cloned().unwrap(), preset);

    assert_eq!(
        merged["setupFiles"],
        json!(["<rootDir>/preset-setup.js", "<rootDir>/user-setup.js"])
    );
    assert_eq!(
        merged["moduleNameMapper"],
        json!({"^a$": "preset-a", "^b$": "user-b"})
    );
    assert_eq!(merged["verbose"], Value::Bool(false));
}
