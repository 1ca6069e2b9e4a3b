//! Parser adapter.
//!
//! [`SyntaxChecker`] is the seam between the validator and a Lua grammar backend: a backend says
//! either "parsed" or "failed at (maybe) this position with (maybe) this message". The adapter
//! turns a failure into exactly one `LUA_SYNTAX` error diagnostic and never lets a backend error
//! escape.

use crate::ValidatorError;
use crate::diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticKind, SYNTAX_ERROR_FALLBACK_MESSAGE, Severity,
};
use crate::line_index::LineIndex;
use rbx_validator_treesitter::{LuaSyntaxChecker, ParseOutcome};

/// A parse failure as reported by a backend.
///
/// Positions are 1-based (`char` columns). Backends that cannot locate the error leave them
/// `None`; a `0` is treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxFailure {
    /// 1-based line, if known.
    pub line: Option<usize>,
    /// 1-based column, if known.
    pub column: Option<usize>,
    /// Backend message, if any.
    pub message: Option<String>,
}

/// A full-text Lua syntax check.
pub trait SyntaxChecker {
    /// Parse `source` and report the first failure, or `Ok(None)` if it parsed.
    ///
    /// `Err` means the backend itself broke, not that the source is invalid.
    fn check(
        &self,
        source: &str,
        index: &LineIndex,
    ) -> Result<Option<SyntaxFailure>, ValidatorError>;
}

impl SyntaxChecker for LuaSyntaxChecker {
    fn check(
        &self,
        source: &str,
        index: &LineIndex,
    ) -> Result<Option<SyntaxFailure>, ValidatorError> {
        match LuaSyntaxChecker::check(self, source)? {
            ParseOutcome::Valid => Ok(None),
            ParseOutcome::Invalid(error) => {
                let position = index.position_at_point(error.row, error.byte_column);
                Ok(Some(SyntaxFailure {
                    line: Some(position.line),
                    column: Some(position.column),
                    message: Some(error.message),
                }))
            }
        }
    }
}

/// Run `checker` over `source`, producing at most one diagnostic.
pub(crate) fn check_syntax<C: SyntaxChecker + ?Sized>(
    checker: &C,
    source: &str,
    index: &LineIndex,
) -> Option<Diagnostic> {
    match checker.check(source, index) {
        Ok(None) => None,
        Ok(Some(failure)) => Some(failure_to_diagnostic(failure, index)),
        Err(err) => {
            tracing::warn!(error = %err, "syntax checker failed");
            Some(Diagnostic::validation_failed())
        }
    }
}

fn failure_to_diagnostic(failure: SyntaxFailure, index: &LineIndex) -> Diagnostic {
    let line = failure.line.filter(|&n| n > 0).unwrap_or(1);
    let column = failure.column.filter(|&n| n > 0).unwrap_or(1);
    let message = failure
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| SYNTAX_ERROR_FALLBACK_MESSAGE.to_string());

    Diagnostic::new(
        index.clamp(line, column),
        message,
        DiagnosticKind::Syntax,
        Severity::Error,
        Some(DiagnosticCode::LuaSyntax),
    )
}
