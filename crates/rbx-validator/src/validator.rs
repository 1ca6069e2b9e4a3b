use crate::ValidatorError;
use crate::config::ValidatorConfig;
use crate::line_index::LineIndex;
use crate::result::ValidationResult;
use crate::roblox::RobloxChecks;
use crate::scanner::PatternScanner;
use crate::syntax::{SyntaxChecker, check_syntax};
use rbx_validator_treesitter::LuaSyntaxChecker;
use std::panic::{self, AssertUnwindSafe};

/// A reusable, stateless validator.
///
/// Construction compiles the configured rule tables once; [`validate`](Self::validate) is then a
/// pure function of its input and may be called concurrently from many threads.
#[derive(Debug, Clone)]
pub struct Validator<C = LuaSyntaxChecker> {
    config: ValidatorConfig,
    checker: C,
    scanner: PatternScanner,
    roblox: RobloxChecks,
}

impl Validator<LuaSyntaxChecker> {
    /// Create a validator backed by the Tree-sitter Lua grammar.
    pub fn new(config: ValidatorConfig) -> Result<Self, ValidatorError> {
        Self::with_checker(config, LuaSyntaxChecker::new())
    }
}

impl<C: SyntaxChecker> Validator<C> {
    /// Create a validator with a custom syntax checker backend.
    pub fn with_checker(config: ValidatorConfig, checker: C) -> Result<Self, ValidatorError> {
        let scanner = PatternScanner::new(&config.rules)?;
        let roblox = RobloxChecks::new(&config.rules)?;
        Ok(Self {
            config,
            checker,
            scanner,
            roblox,
        })
    }

    /// The configuration this validator was built with.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one source text.
    ///
    /// Never fails: syntax errors become an error diagnostic, and any internal failure becomes a
    /// single synthetic `"Validation failed"` error. Empty or whitespace-only input is valid and
    /// runs no rule.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn validate(&self, source: &str) -> ValidationResult {
        if source.trim().is_empty() {
            return ValidationResult::empty();
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.run(source))) {
            Ok(result) => {
                tracing::debug!(
                    errors = result.error_count(),
                    warnings = result.warning_count(),
                    "validated"
                );
                result
            }
            Err(payload) => {
                let err = ValidatorError::Panic(panic_message(payload.as_ref()));
                tracing::warn!(error = %err, "validation failed");
                ValidationResult::validation_failed()
            }
        }
    }

    fn run(&self, source: &str) -> ValidationResult {
        let index = LineIndex::from_text(source);
        let mut diagnostics = Vec::new();

        if self.config.syntax {
            diagnostics.extend(check_syntax(&self.checker, source, &index));
        }
        if self.config.deprecated_api {
            self.scanner.scan_deprecated(source, &index, &mut diagnostics);
        }
        if self.config.best_practice {
            self.scanner
                .scan_best_practices(source, &index, &mut diagnostics);
        }
        if self.config.unknown_service {
            self.roblox
                .scan_service_lookups(source, &index, &mut diagnostics);
        }
        if self.config.local_player {
            self.roblox.scan_local_player(source, &index, &mut diagnostics);
        }

        ValidationResult::from_diagnostics(diagnostics)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
