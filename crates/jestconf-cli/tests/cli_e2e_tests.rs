//! End-to-end tests for the jestconf binary.
//!
//! Each test builds a throwaway project, runs the compiled binary inside it
//! and inspects the JSON it prints.

use assert_cmd::Command;
use jestconf_test_utils::TestProject;
use predicates::prelude::*;
use serde_json::{Value, json};

fn jestconf(project: &TestProject) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jestconf"));
    cmd.current_dir(project.root())
        .env("NO_COLOR", "1")
        .env_remove("JESTCONF_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn project() -> TestProject {
    TestProject::new().with_default_modules()
}

/// Run to success and parse stdout.
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_describes_the_tool() {
    let project = project();
    jestconf(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jestconf"))
        .stdout(predicate::str::contains("--maxWorkers"));
}

#[test]
fn version_prints_package_version() {
    let project = project();
    jestconf(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Config sources
// ============================================================================

#[test]
fn discovers_config_file_in_working_directory() {
    let project = project();
    project.write_json("jest.config.json", &json!({"testTimeout": 1234}));

    let output = run_json(&mut jestconf(&project));

    assert_eq!(output["config"]["rootDir"], json!(project.root_str()));
    assert_eq!(output["config"]["testTimeout"], json!(1234));
    assert_eq!(output["hasDeprecationWarnings"], json!(false));
}

#[test]
fn reads_jest_field_of_package_json() {
    let project = project();
    project.write_json(
        "package.json",
        &json!({"name": "app", "jest": {"displayName": "app-tests"}}),
    );

    let output = run_json(jestconf(&project).args(["--config", "package.json"]));

    assert_eq!(output["config"]["displayName"], json!("app-tests"));
}

#[test]
fn empty_directory_uses_defaults() {
    let project = project();

    let output = run_json(&mut jestconf(&project));

    assert_eq!(output["config"]["rootDir"], json!(project.root_str()));
    assert_eq!(output["config"]["roots"], json!([project.root_str()]));
    assert_eq!(
        output["config"]["testEnvironment"],
        json!(project.path("node_modules/jest-environment-jsdom/index.js"))
    );
}

#[test]
fn inline_json_config_ignores_files_on_disk() {
    let project = project();
    project.write_json("jest.config.json", &json!({"displayName": "from-file"}));

    let output = run_json(jestconf(&project).args(["--config", r#"{"displayName": "inline"}"#]));

    assert_eq!(output["config"]["displayName"], json!("inline"));
    assert_eq!(output["config"]["rootDir"], json!(project.root_str()));
}

#[test]
fn missing_config_file_fails() {
    let project = project();
    jestconf(&project)
        .args(["--config", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't find a config file"));
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn flags_override_file_options() {
    let project = project();
    project.write_json("jest.config.json", &json!({"maxWorkers": 3, "bail": false}));

    let output = run_json(jestconf(&project).args(["--maxWorkers=2", "--bail"]));

    assert_eq!(output["config"]["maxWorkers"], json!(2));
    assert_eq!(output["config"]["bail"], json!(1));
}

#[test]
fn positional_patterns_build_test_path_pattern() {
    let project = project();

    let output = run_json(jestconf(&project).args(["foo", "bar"]));

    assert_eq!(output["config"]["testPathPattern"], json!("foo|bar"));
    assert_eq!(output["config"]["nonFlagArgs"], json!(["foo", "bar"]));
}

#[test]
fn set_assigns_arbitrary_options() {
    let project = project();

    let output = run_json(jestconf(&project).args(["--set", "testTimeout=50"]));

    assert_eq!(output["config"]["testTimeout"], json!(50));
}

#[test]
fn ci_without_update_flag_never_writes_snapshots() {
    let project = project();

    let output = run_json(jestconf(&project).arg("--ci"));

    assert_eq!(output["config"]["ci"], json!(true));
    assert_eq!(output["config"]["updateSnapshot"], json!("none"));
}

#[test]
fn raw_output_omits_computed_keys() {
    let project = project();

    let output = run_json(jestconf(&project).args(["--raw", "foo"]));

    assert!(output["config"].get("testPathPattern").is_none());
    assert!(output["config"].get("nonFlagArgs").is_none());
    assert_eq!(output["config"]["rootDir"], json!(project.root_str()));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn deprecated_option_is_reported_on_stderr() {
    let project = project();
    project.write("setup.js", "");
    project.write_json(
        "jest.config.json",
        &json!({"setupTestFrameworkScriptFile": "<rootDir>/setup.js"}),
    );

    let assert = jestconf(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("setupTestFrameworkScriptFile"));
    let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(output["hasDeprecationWarnings"], json!(true));
    assert_eq!(
        output["config"]["setupFilesAfterEnv"],
        json!([project.path("setup.js")])
    );
}

#[test]
fn conflicting_options_fail_with_both_names() {
    let project = project();
    project.write_json(
        "jest.config.json",
        &json!({"testMatch": ["**/*.test.js"], "testRegex": "spec\\.js$"}),
    );

    jestconf(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation Error"))
        .stderr(predicate::str::contains("\"testMatch\""))
        .stderr(predicate::str::contains("\"testRegex\""));
}

#[test]
fn missing_preset_fails() {
    let project = project();
    project.write_json("jest.config.json", &json!({"preset": "does-not-exist"}));

    jestconf(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset does-not-exist not found."));
}

#[test]
fn invalid_test_path_pattern_warns_and_runs_everything() {
    let project = project();

    let assert = jestconf(&project)
        .arg("(")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid testPattern"));
    let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(output["config"]["testPathPattern"], json!(""));
}
