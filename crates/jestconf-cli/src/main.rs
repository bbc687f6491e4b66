//! jestconf CLI
//!
//! Resolves a Jest-style configuration and prints the normalized result.

mod cli;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;
use jestconf_core::{Normalizer, RawConfig, RawConfigReader};
use jestconf_fs::NormalizedPath;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), output::highlight_options(&e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = NormalizedPath::new(std::env::current_dir()?);
    let argv = cli.to_argv()?;
    let raw = load_raw_config(&cli, &cwd)?;

    let mut normalizer = Normalizer::new();
    if let Some(path) = raw.config_path {
        normalizer = normalizer.with_config_path(path);
    }
    let normalized = normalizer.normalize(raw.options, &argv)?;

    output::print_report(&normalized.report);
    output::print_config(&normalized, cli.raw)
}

/// `RUST_LOG` controls the filter unless `--verbose` asks for debug output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
    tracing::debug!("Verbose mode enabled");
}

/// Options from `--config`, or discovered from the working directory.
///
/// Inline JSON starts from an empty config rooted at the working
/// directory; the JSON itself is layered in with the other flags.
fn load_raw_config(cli: &Cli, cwd: &NormalizedPath) -> Result<RawConfig> {
    let reader = RawConfigReader::new();

    if cli.config.is_some() && cli.config_path().is_none() {
        let mut options = Map::new();
        options.insert("rootDir".into(), Value::String(cwd.to_string()));
        return Ok(RawConfig {
            options,
            config_path: None,
        });
    }

    match cli.config_path() {
        Some(path) => {
            let path = cwd.resolve(path);
            if !path.exists() {
                return Err(CliError::user(format!(
                    "Can't find a config file at \"{path}\""
                )));
            }
            Ok(reader.read(&path)?)
        }
        None => Ok(reader.discover(cwd)?),
    }
}
