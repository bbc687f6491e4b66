//! Rendering results and errors for the terminal.

use colored::Colorize;
use jestconf_core::{NormalizationReport, Normalized};
use serde_json::{Value, json};

use crate::error::{CliError, Result};

/// Print the configuration as pretty JSON on stdout.
///
/// With `raw` the options are folded back into the shape a user would
/// write, so the output can be fed to another run.
pub fn print_config(normalized: &Normalized, raw: bool) -> Result<()> {
    let config = if raw {
        Value::Object(normalized.config.to_raw_options())
    } else {
        serde_json::to_value(&normalized.config)?
    };
    let document = json!({
        "config": config,
        "hasDeprecationWarnings": normalized.has_deprecation_warnings(),
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Deprecations and warnings go to stderr so stdout stays parseable.
pub fn print_report(report: &NormalizationReport) {
    for message in &report.deprecations {
        eprintln!("{}: {}", "deprecated".yellow().bold(), message);
    }
    for message in &report.warnings {
        eprintln!("{}: {}", "warning".yellow().bold(), message);
    }
}

/// The error message with its quoted option names in bold.
pub fn highlight_options(err: &CliError) -> String {
    let mut message = err.to_string();
    for option in err.options() {
        let quoted = format!("\"{option}\"");
        message = message.replace(&quoted, &quoted.bold().to_string());
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_leaves_plain_errors_alone() {
        let err = CliError::user("nothing to see");
        assert_eq!(highlight_options(&err), "nothing to see");
    }

    #[test]
    fn highlight_keeps_option_names() {
        colored::control::set_override(false);
        let err = CliError::Core(jestconf_core::Error::MissingRootDir);
        let message = highlight_options(&err);
        assert!(message.contains("\"rootDir\""));
    }
}
