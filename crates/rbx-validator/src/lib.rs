#![warn(missing_docs)]
//! rbx-validator - single-pass static checks for Roblox Lua/Luau scripts.
//!
//! # Overview
//!
//! `rbx-validator` takes one source text and returns a structured list of diagnostics. It is a
//! pure, synchronous function of its input: no I/O, no state kept between calls, safe to run on
//! many files in parallel. Debounced re-validation, rendering, and filtering UI belong to the
//! caller.
//!
//! # Pipeline
//!
//! ```text
//! source ─┬─ syntax check (Tree-sitter Lua)          → at most one LUA_SYNTAX error
//!         ├─ deprecated API table                    → DEPRECATED_API warnings
//!         ├─ best-practice table                     → BEST_PRACTICE infos
//!         ├─ GetService name vetting                 → UNKNOWN_SERVICE warnings
//!         └─ LocalPlayer references                  → LOCALPLAYER_SERVER warnings
//!                             │
//!                             ▼
//!                    ValidationResult { is_valid, errors, warnings }
//! ```
//!
//! Pattern rules match raw text, so they also fire inside comments and string literals.
//!
//! # Quick Start
//!
//! ```rust
//! use rbx_validator::{DiagnosticCode, validate};
//!
//! let result = validate("wait(5)");
//! assert!(result.is_valid);
//! assert_eq!(result.warnings.len(), 1);
//! assert_eq!(result.warnings[0].code, Some(DiagnosticCode::DeprecatedApi));
//! assert_eq!(result.warnings[0].line, 1);
//!
//! let result = validate("local x = (");
//! assert!(!result.is_valid);
//! assert_eq!(result.errors.len(), 1);
//! ```
//!
//! A configured validator can skip whole rule categories:
//!
//! ```rust
//! use rbx_validator::{RuleCategory, Validator, ValidatorConfig};
//!
//! let config = ValidatorConfig::new().without(RuleCategory::BestPractice);
//! let validator = Validator::new(config).unwrap();
//! assert!(validator.validate("while true do end").warnings.is_empty());
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - diagnostic records, kinds, severities, codes
//! - [`line_index`] - offset → `(line, column)` conversion
//! - [`syntax`] - parser adapter and the [`SyntaxChecker`] seam
//! - [`scanner`] - compiled regex rule tables
//! - [`roblox`] - service-name and `LocalPlayer` checks
//! - [`result`] - [`ValidationResult`] and problem-list queries
//! - [`config`] - [`ValidatorConfig`]

pub mod config;
pub mod diagnostics;
mod error;
pub mod line_index;
pub mod result;
pub mod roblox;
pub mod scanner;
pub mod syntax;
mod validator;

pub use config::{ConfigError, RuleCategory, ValidatorConfig};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, Severity};
pub use error::ValidatorError;
pub use line_index::{LineIndex, Position};
pub use rbx_validator_rules::RuleSet;
pub use result::{IssueFilter, ValidationResult};
pub use syntax::{SyntaxChecker, SyntaxFailure};
pub use validator::Validator;

use std::sync::LazyLock;

static DEFAULT_VALIDATOR: LazyLock<Result<Validator, ValidatorError>> =
    LazyLock::new(|| Validator::new(ValidatorConfig::default()));

/// Validate `source` with the default configuration.
///
/// Never fails; see [`Validator::validate`].
pub fn validate(source: &str) -> ValidationResult {
    if source.trim().is_empty() {
        return ValidationResult::empty();
    }

    match &*DEFAULT_VALIDATOR {
        Ok(validator) => validator.validate(source),
        Err(err) => {
            tracing::warn!(error = %err, "default validator unavailable");
            ValidationResult::validation_failed()
        }
    }
}

/// Validate `source` and return the diagnostics on a 1-based line.
pub fn issues_for_line(source: &str, line: usize) -> Vec<Diagnostic> {
    validate(source)
        .issues_on_line(line)
        .into_iter()
        .cloned()
        .collect()
}

/// Validate `source` and return every diagnostic ordered by position.
pub fn all_issues(source: &str) -> Vec<Diagnostic> {
    validate(source).sorted().into_iter().cloned().collect()
}
