//! Overlaying normalized options onto the defaults.

use crate::argv::{Argv, is_truthy};
use crate::config::SnapshotUpdate;
use jestconf_fs::NormalizedPath;
use jestconf_fs::checksum::digest_hex;
use jestconf_meta::defaults::{TEXT_COVERAGE_REPORTER, default_config};
use serde_json::{Map, Value, json};

/// Command-line derived state the fix-ups need.
pub(crate) struct Assembly<'a> {
    pub argv: &'a Argv,
    pub root_dir: &'a NormalizedPath,
    pub config_path: Option<&'a NormalizedPath>,
    pub project_index: usize,
    pub positional: Vec<String>,
    pub test_path_pattern: String,
    /// Runtime support module to run first when the default compiler is
    /// in effect.
    pub runtime_setup: Option<String>,
    pub cpus: usize,
}

impl Assembly<'_> {
    /// Lay `options` over the defaults and apply the fix-ups, in order.
    pub(crate) fn assemble(self, options: Map<String, Value>) -> Map<String, Value> {
        let mut config = default_config();
        config.extend(options);

        if let Some(ci) = self.argv.get("ci") {
            config.insert("ci".into(), Value::Bool(is_truthy(ci)));
        }
        config.insert(
            "nonFlagArgs".into(),
            Value::Array(self.positional.iter().cloned().map(Value::String).collect()),
        );
        config.insert(
            "testPathPattern".into(),
            Value::String(self.test_path_pattern.clone()),
        );
        config.insert("json".into(), Value::Bool(self.argv.is_set("json")));

        self.derive_name(&mut config);
        self.only_changed(&mut config);
        self.update_snapshot(&mut config);
        self.inject_runtime(&mut config);
        self.strip_text_reporter(&mut config);

        let workers = self.max_workers(&config);
        config.insert("maxWorkers".into(), json!(workers));
        config
    }

    fn derive_name(&self, config: &mut Map<String, Value>) {
        let named = config
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.is_empty());
        if named {
            return;
        }
        let index = self.project_index.to_string();
        let name = digest_hex(&[
            self.root_dir.as_str(),
            self.config_path.map(NormalizedPath::as_str).unwrap_or_default(),
            index.as_str(),
        ]);
        config.insert("name".into(), Value::String(name));
    }

    fn only_changed(&self, config: &mut Map<String, Value>) {
        let changed_detection = ["lastCommit", "changedFilesWithAncestor", "changedSince"]
            .iter()
            .any(|key| config.get(*key).is_some_and(is_truthy));
        if changed_detection {
            config.insert("onlyChanged".into(), Value::Bool(true));
        }

        if self.argv.is_set("all") {
            config.insert("onlyChanged".into(), Value::Bool(false));
        } else if !self.test_path_pattern.is_empty() {
            let watch = config.get("watch").is_some_and(is_truthy);
            config.insert("onlyChanged".into(), Value::Bool(watch));
        }
    }

    fn update_snapshot(&self, config: &mut Map<String, Value>) {
        let ci = config.get("ci").is_some_and(is_truthy);
        let requested = self.argv.is_set("updateSnapshot");
        let mode = if ci && !requested {
            SnapshotUpdate::None
        } else if requested {
            SnapshotUpdate::All
        } else {
            SnapshotUpdate::New
        };
        config.insert("updateSnapshot".into(), Value::String(mode.as_str().into()));
    }

    fn inject_runtime(&self, config: &mut Map<String, Value>) {
        let Some(runtime) = &self.runtime_setup else {
            return;
        };
        let runtime = Value::String(runtime.clone());
        let setup_files = config
            .entry("setupFiles")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(files) = setup_files {
            if !files.contains(&runtime) {
                files.insert(0, runtime);
            }
        }
    }

    fn strip_text_reporter(&self, config: &mut Map<String, Value>) {
        if !self.argv.is_set("json") {
            return;
        }
        if let Some(Value::Array(reporters)) = config.get_mut("coverageReporters") {
            reporters.retain(|reporter| {
                let name = match reporter {
                    Value::Array(pair) => pair.first().and_then(Value::as_str),
                    other => other.as_str(),
                };
                name != Some(TEXT_COVERAGE_REPORTER)
            });
        }
    }

    /// `--runInBand` means one worker. Otherwise an explicit count or
    /// percentage wins, then one worker per spare core: half of them in
    /// watch mode, all but one otherwise.
    fn max_workers(&self, config: &Map<String, Value>) -> u64 {
        if self.argv.is_set("runInBand") {
            return 1;
        }

        let explicit = self
            .argv
            .get("maxWorkers")
            .or_else(|| config.get("maxWorkers"))
            .and_then(|value| parse_workers(value, self.cpus));
        if let Some(workers) = explicit {
            return workers;
        }

        let cpus = self.cpus as u64;
        let watching = config.get("watch").is_some_and(is_truthy)
            || config.get("watchAll").is_some_and(is_truthy);
        if watching {
            (cpus / 2).max(1)
        } else {
            cpus.saturating_sub(1).max(1)
        }
    }
}

fn parse_workers(value: &Value, cpus: usize) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().filter(|n| *n > 0),
        Value::String(s) => {
            let s = s.trim();
            if let Some(percent) = s.strip_suffix('%') {
                let percent: f64 = percent.trim().parse().ok()?;
                Some(((cpus as f64 * percent / 100.0).floor() as u64).max(1))
            } else {
                s.parse::<u64>().ok().filter(|n| *n > 0)
            }
        }
        _ => None,
    }
}
