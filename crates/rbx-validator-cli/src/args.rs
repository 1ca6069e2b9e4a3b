use clap::{ArgAction, Parser, ValueEnum};
use rbx_validator::{IssueFilter, RuleCategory};
use std::path::PathBuf;

/// Validate Roblox Lua/Luau scripts.
#[derive(Debug, Parser)]
#[command(name = "rbx-validate", version, about)]
pub struct Cli {
    /// Files to validate. No files, or `-`, reads stdin.
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Which issues to print.
    #[arg(long, value_enum, default_value_t = Show::All)]
    pub show: Show,

    /// JSON config file (e.g. `{ "bestPractice": false }`).
    #[arg(long, env = "RBX_VALIDATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable a rule category (syntax, deprecated-api, best-practice, unknown-service,
    /// local-player). Repeatable.
    #[arg(long = "disable", value_name = "CATEGORY")]
    pub disable: Vec<RuleCategory>,

    /// When to color text output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Show {
    All,
    Errors,
    Warnings,
}

impl From<Show> for IssueFilter {
    fn from(show: Show) -> Self {
        match show {
            Show::All => IssueFilter::All,
            Show::Errors => IssueFilter::Errors,
            Show::Warnings => IssueFilter::Warnings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}
