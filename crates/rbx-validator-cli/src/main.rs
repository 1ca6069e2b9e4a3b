//! `rbx-validate`: check Roblox Lua/Luau scripts from the command line.
//!
//! # Usage
//!
//! ```bash
//! rbx-validate src/**/*.lua
//! cat script.lua | rbx-validate --format json
//! rbx-validate --disable best-practice --show errors game.lua
//! ```
//!
//! Exit status is `0` when every input is syntactically valid, `1` when any input has an
//! error, and `2` when an input or the config could not be read.

mod args;
mod report;

use args::{Cli, ColorChoice, OutputFormat};
use clap::Parser;
use rbx_validator::{ConfigError, ValidationResult, Validator, ValidatorConfig, ValidatorError};
use report::FileReport;
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;

const STDIN_PATH: &str = "-";

const EXIT_VALID: u8 = 0;
const EXIT_INVALID: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validator(#[from] ValidatorError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let outcome = run(&cli, &mut std::io::stdout().lock());
    ExitCode::from(finish(outcome))
}

/// Map a run to the process exit status, reporting failures on stderr.
fn finish(outcome: Result<Vec<FileReport>, CliError>) -> u8 {
    match outcome {
        Ok(reports) => exit_status(&reports),
        Err(err) => {
            tracing::error!(error = %err, "rbx-validate failed");
            eprintln!("rbx-validate: {err}");
            EXIT_FAILURE
        }
    }
}

fn exit_status(reports: &[FileReport]) -> u8 {
    if reports.iter().all(|report| report.result.is_valid) {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

fn setup_tracing(verbose: u8) {
    let env_layer = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    });
    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(env_layer)
        .with(format_layer)
        .init();
}

/// Validate every input and write the rendered reports to `out`.
fn run(cli: &Cli, out: &mut dyn Write) -> Result<Vec<FileReport>, CliError> {
    let validator = Validator::new(load_config(cli)?)?;
    let reports = validate_inputs(&validator, read_inputs(&cli.files)?);

    let filter = cli.show.into();
    let output = match cli.format {
        OutputFormat::Json => {
            let mut json = report::render_json(&reports, filter)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => {
            let color = match cli.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => std::io::stdout().is_terminal(),
            };
            report::render_text(&reports, filter, color)
        }
    };

    out.write_all(output.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| CliError::Io {
            path: "<stdout>".to_string(),
            source,
        })?;

    Ok(reports)
}

/// Validate each `(path, source)` input on its own scoped thread, keeping input order.
fn validate_inputs(validator: &Validator, inputs: Vec<(String, String)>) -> Vec<FileReport> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|(path, source)| (path, scope.spawn(move || validator.validate(&source))))
            .collect();
        handles
            .into_iter()
            .map(|(path, handle)| FileReport {
                path,
                result: handle
                    .join()
                    .unwrap_or_else(|_| ValidationResult::validation_failed()),
            })
            .collect()
    })
}

fn load_config(cli: &Cli) -> Result<ValidatorConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            ValidatorConfig::from_json_file(path)?
        }
        None => ValidatorConfig::default(),
    };
    for category in &cli.disable {
        config.set_enabled(*category, false);
    }
    Ok(config)
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<(String, String)>, CliError> {
    if files.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    files
        .iter()
        .map(|path| {
            if path == Path::new(STDIN_PATH) {
                read_stdin()
            } else {
                read_file(path)
            }
        })
        .collect()
}

fn read_stdin() -> Result<(String, String), CliError> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(|source| CliError::Io {
            path: "<stdin>".to_string(),
            source,
        })?;
    Ok(("<stdin>".to_string(), source))
}

fn read_file(path: &Path) -> Result<(String, String), CliError> {
    let display = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: display.clone(),
        source,
    })?;
    Ok((display, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rbx_validator::RuleCategory;

    #[test]
    fn test_disable_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "rbx-validate",
            "--disable",
            "deprecated-api",
            "--disable",
            "unknown-service",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert!(!config.is_enabled(RuleCategory::DeprecatedApi));
        assert!(!config.is_enabled(RuleCategory::UnknownService));
        assert!(config.is_enabled(RuleCategory::Syntax));
        assert!(config.is_enabled(RuleCategory::BestPractice));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = read_inputs(&[PathBuf::from("definitely/not/here.lua")]).unwrap_err();
        match err {
            CliError::Io { path, .. } => assert_eq!(path, "definitely/not/here.lua"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_config_is_reported() {
        let cli = Cli::try_parse_from(["rbx-validate", "--config", "no/such/config.json"]).unwrap();
        assert!(matches!(load_config(&cli), Err(CliError::Config(_))));
    }

    fn cli_for(files: &[&Path], extra: &[&str]) -> Cli {
        let mut args = vec!["rbx-validate".to_string(), "--color".to_string(), "never".to_string()];
        args.extend(extra.iter().map(|arg| arg.to_string()));
        args.extend(files.iter().map(|path| path.display().to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    fn write_script(dir: &Path, name: &str, source: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn test_valid_files_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let clean = write_script(dir.path(), "clean.lua", "local x = 1\nprint(x)\n");
        let warned = write_script(dir.path(), "warned.lua", "wait(1)\n");

        let mut out = Vec::new();
        let reports = run(&cli_for(&[&clean, &warned], &[]), &mut out).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].path, clean.display().to_string());
        assert_eq!(reports[1].path, warned.display().to_string());
        assert_eq!(exit_status(&reports), EXIT_VALID);

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("0 error(s), 1 warning(s) in 2 file(s)\n"));
    }

    #[test]
    fn test_syntax_error_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let clean = write_script(dir.path(), "clean.lua", "local x = 1\n");
        let broken = write_script(dir.path(), "broken.lua", "local x = (\n");

        let mut out = Vec::new();
        let outcome = run(&cli_for(&[&clean, &broken], &["--format", "json"]), &mut out);
        let reports = outcome.unwrap();
        assert!(reports[0].result.is_valid);
        assert!(!reports[1].result.is_valid);
        assert_eq!(finish(Ok(reports)), EXIT_INVALID);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[1]["isValid"], false);
        assert_eq!(json[1]["errors"][0]["code"], "LUA_SYNTAX");
    }

    #[test]
    fn test_unreadable_file_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let clean = write_script(dir.path(), "clean.lua", "local x = 1\n");
        let missing = dir.path().join("missing.lua");

        let mut out = Vec::new();
        let outcome = run(&cli_for(&[&clean, &missing], &[]), &mut out);
        assert!(matches!(outcome, Err(CliError::Io { .. })));
        assert!(out.is_empty());
        assert_eq!(finish(outcome), EXIT_FAILURE);
    }

    #[test]
    fn test_empty_report_list_is_valid() {
        assert_eq!(exit_status(&[]), EXIT_VALID);
    }
}
