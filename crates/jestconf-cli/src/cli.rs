//! CLI argument parsing using clap derive

use clap::Parser;
use jestconf_core::Argv;
use serde_json::Value;

use crate::error::{CliError, Result};

/// jestconf - Resolve a Jest-style configuration into its normalized form
///
/// Reads options from a config file, `package.json` or inline JSON, layers
/// command-line flags on top and prints the normalized configuration.
///
/// Examples:
///   jestconf                          # Discover config in the current directory
///   jestconf -c jest.config.json      # Use a specific file
///   jestconf -c '{"rootDir": "."}'    # Inline JSON
///   jestconf --ci --maxWorkers=50% src/  # Flags and test path patterns
#[derive(Parser, Debug)]
#[command(name = "jestconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file, directory or inline JSON object
    #[arg(short, long, env = "JESTCONF_CONFIG")]
    pub config: Option<String>,

    /// Root directory, overriding the one in the config
    #[arg(long = "rootDir", alias = "root-dir")]
    pub root_dir: Option<String>,

    /// Print options in their user-facing shape instead of the normalized one
    #[arg(long)]
    pub raw: bool,

    /// Running in a continuous integration environment
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub ci: Option<bool>,

    /// Machine-readable output mode
    #[arg(long)]
    pub json: bool,

    /// Run all tests instead of only changed ones
    #[arg(long)]
    pub all: bool,

    /// Watch files for changes
    #[arg(long)]
    pub watch: bool,

    /// Watch files and rerun all tests
    #[arg(long = "watchAll", alias = "watch-all")]
    pub watch_all: bool,

    /// Rewrite failing snapshots
    #[arg(short = 'u', long = "updateSnapshot", alias = "update-snapshot")]
    pub update_snapshot: bool,

    /// Run the tests related to the given source files
    #[arg(long = "findRelatedTests", alias = "find-related-tests")]
    pub find_related_tests: bool,

    /// Regular expression selecting test paths (repeatable)
    #[arg(long = "testPathPattern", alias = "test-path-pattern")]
    pub test_path_pattern: Vec<String>,

    /// Run tests serially in the current process
    #[arg(short = 'i', long = "runInBand", alias = "run-in-band")]
    pub run_in_band: bool,

    /// Worker count or percentage of available cores
    #[arg(short = 'w', long = "maxWorkers", alias = "max-workers")]
    pub max_workers: Option<String>,

    /// Collect coverage information
    #[arg(long)]
    pub coverage: bool,

    /// Stop after the first failure, or after N failures
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub bail: Option<String>,

    /// Test environment module
    #[arg(long)]
    pub env: Option<String>,

    /// Only run tests related to changed files
    #[arg(short = 'o', long = "onlyChanged", alias = "only-changed")]
    pub only_changed: bool,

    /// Run tests related to the last commit
    #[arg(long = "lastCommit", alias = "last-commit")]
    pub last_commit: bool,

    /// Run tests related to changes since a branch or commit
    #[arg(long = "changedSince", alias = "changed-since")]
    pub changed_since: Option<String>,

    /// Glob of files to collect coverage from (repeatable)
    #[arg(long = "collectCoverageFrom", alias = "collect-coverage-from")]
    pub collect_coverage_from: Vec<String>,

    /// Set any option as KEY=VALUE, where VALUE is JSON or a bare string
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Test path patterns or, with --findRelatedTests, source files
    pub patterns: Vec<String>,
}

impl Cli {
    /// The `--config` value when it names a file or directory.
    pub fn config_path(&self) -> Option<&str> {
        self.config
            .as_deref()
            .filter(|c| !c.trim_start().starts_with('{'))
    }

    /// Flags as option overrides, keyed by option name.
    pub fn to_argv(&self) -> Result<Argv> {
        let mut argv = Argv::new().with_positional(self.patterns.iter().cloned());

        let switches = [
            ("json", self.json),
            ("all", self.all),
            ("watch", self.watch),
            ("watchAll", self.watch_all),
            ("updateSnapshot", self.update_snapshot),
            ("findRelatedTests", self.find_related_tests),
            ("runInBand", self.run_in_band),
            ("coverage", self.coverage),
            ("onlyChanged", self.only_changed),
            ("lastCommit", self.last_commit),
        ];
        for (key, on) in switches {
            if on {
                argv.set_flag(key, true);
            }
        }

        if let Some(ci) = self.ci {
            argv.set_flag("ci", ci);
        }
        if let Some(config) = &self.config {
            argv.set_flag("config", config.as_str());
        }
        if let Some(root_dir) = &self.root_dir {
            argv.set_flag("rootDir", root_dir.as_str());
        }
        if let Some(workers) = &self.max_workers {
            argv.set_flag("maxWorkers", flag_value(workers));
        }
        if let Some(bail) = &self.bail {
            argv.set_flag("bail", flag_value(bail));
        }
        if let Some(env) = &self.env {
            argv.set_flag("env", env.as_str());
        }
        if let Some(since) = &self.changed_since {
            argv.set_flag("changedSince", since.as_str());
        }
        if !self.test_path_pattern.is_empty() {
            argv.set_flag("testPathPattern", self.test_path_pattern.clone());
        }
        if !self.collect_coverage_from.is_empty() {
            argv.set_flag("collectCoverageFrom", self.collect_coverage_from.clone());
        }

        for assignment in &self.set {
            let (key, value) = assignment.split_once('=').ok_or_else(|| {
                CliError::user(format!("Expected KEY=VALUE for --set, got \"{assignment}\""))
            })?;
            if key.is_empty() {
                return Err(CliError::user(format!(
                    "Missing option name in --set \"{assignment}\""
                )));
            }
            argv.set_flag(key, flag_value(value));
        }

        Ok(argv)
    }
}

/// JSON when it parses as JSON, otherwise the bare string.
fn flag_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["jestconf"]);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(cli.patterns.is_empty());

        let argv = cli.to_argv().unwrap();
        assert!(argv.flags().is_empty());
    }

    #[test]
    fn parse_short_verbose_flag() {
        let cli = Cli::parse_from(["jestconf", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn switches_become_flags() {
        let cli = Cli::parse_from(["jestconf", "--watchAll", "-u", "-i", "--coverage"]);
        let argv = cli.to_argv().unwrap();

        assert_eq!(argv.get("watchAll"), Some(&json!(true)));
        assert_eq!(argv.get("updateSnapshot"), Some(&json!(true)));
        assert_eq!(argv.get("runInBand"), Some(&json!(true)));
        assert_eq!(argv.get("coverage"), Some(&json!(true)));
        assert_eq!(argv.get("watch"), None);
    }

    #[test]
    fn kebab_case_aliases_are_accepted() {
        let cli = Cli::parse_from(["jestconf", "--watch-all", "--max-workers", "2"]);
        let argv = cli.to_argv().unwrap();

        assert_eq!(argv.get("watchAll"), Some(&json!(true)));
        assert_eq!(argv.get("maxWorkers"), Some(&json!(2)));
    }

    #[test]
    fn ci_accepts_optional_value() {
        let on = Cli::parse_from(["jestconf", "--ci"]).to_argv().unwrap();
        let off = Cli::parse_from(["jestconf", "--ci=false"]).to_argv().unwrap();
        let unset = Cli::parse_from(["jestconf"]).to_argv().unwrap();

        assert_eq!(on.get("ci"), Some(&json!(true)));
        assert_eq!(off.get("ci"), Some(&json!(false)));
        assert_eq!(unset.get("ci"), None);
    }

    #[test]
    fn bail_without_value_is_true() {
        let bare = Cli::parse_from(["jestconf", "--bail", "src"]).to_argv().unwrap();
        let counted = Cli::parse_from(["jestconf", "--bail=3"]).to_argv().unwrap();

        assert_eq!(bare.get("bail"), Some(&json!(true)));
        assert_eq!(bare.positional(), ["src"]);
        assert_eq!(counted.get("bail"), Some(&json!(3)));
    }

    #[test]
    fn max_workers_keeps_percentages_as_strings() {
        let argv = Cli::parse_from(["jestconf", "-w", "50%"]).to_argv().unwrap();
        assert_eq!(argv.get("maxWorkers"), Some(&json!("50%")));
    }

    #[test]
    fn repeated_test_path_patterns_collect() {
        let cli = Cli::parse_from([
            "jestconf",
            "--testPathPattern",
            "a",
            "--testPathPattern",
            "b",
        ]);
        let argv = cli.to_argv().unwrap();
        assert_eq!(argv.strings("testPathPattern"), vec!["a", "b"]);
    }

    #[test]
    fn set_parses_json_and_bare_strings() {
        let cli = Cli::parse_from([
            "jestconf",
            "--set",
            "testTimeout=100",
            "--set",
            "displayName=unit",
            "--set",
            r#"globals={"__DEV__":true}"#,
        ]);
        let argv = cli.to_argv().unwrap();

        assert_eq!(argv.get("testTimeout"), Some(&json!(100)));
        assert_eq!(argv.get("displayName"), Some(&json!("unit")));
        assert_eq!(argv.get("globals"), Some(&json!({"__DEV__": true})));
    }

    #[test]
    fn set_without_equals_is_rejected() {
        let cli = Cli::parse_from(["jestconf", "--set", "testTimeout"]);
        let err = cli.to_argv().unwrap_err();
        assert!(err.to_string().contains("KEY=VALUE"));
    }

    #[test]
    fn inline_config_is_not_a_path() {
        let inline = Cli::parse_from(["jestconf", "-c", r#"{"rootDir": "."}"#]);
        let file = Cli::parse_from(["jestconf", "-c", "jest.config.json"]);

        assert_eq!(inline.config_path(), None);
        assert_eq!(file.config_path(), Some("jest.config.json"));
    }
}
