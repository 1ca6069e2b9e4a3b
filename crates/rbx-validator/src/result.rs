//! Validation results and problem-list queries.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};

/// Which issues a problem list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueFilter {
    /// Errors and warnings.
    #[default]
    All,
    /// Severity `error` only.
    Errors,
    /// Severity `warning` or `info`.
    Warnings,
}

/// Output of one validation pass.
///
/// `errors` holds severity-`error` diagnostics, `warnings` holds `warning` and `info` ones. Both
/// keep discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub is_valid: bool,
    /// Blocking diagnostics.
    pub errors: Vec<Diagnostic>,
    /// Advisory diagnostics.
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    /// A valid result with no diagnostics.
    pub fn empty() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Partition diagnostics by severity, preserving order within each list.
    pub fn from_diagnostics(diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics
            .into_iter()
            .partition(|diagnostic| diagnostic.severity.is_error());

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// The result reported when validation itself fails.
    pub fn validation_failed() -> Self {
        Self::from_diagnostics([Diagnostic::validation_failed()])
    }

    /// Errors then warnings, each in discovery order.
    pub fn issues(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// All diagnostics on a 1-based line.
    pub fn issues_on_line(&self, line: usize) -> Vec<&Diagnostic> {
        self.issues()
            .filter(|diagnostic| diagnostic.line == line)
            .collect()
    }

    /// All diagnostics ordered by `(line, column)`.
    ///
    /// The sort is stable: at equal positions errors precede warnings, and discovery order is kept.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut all: Vec<_> = self.issues().collect();
        all.sort_by_key(|diagnostic| (diagnostic.line, diagnostic.column));
        all
    }

    /// Sorted diagnostics matching `filter`.
    pub fn filtered(&self, filter: IssueFilter) -> Vec<&Diagnostic> {
        let mut issues = self.sorted();
        match filter {
            IssueFilter::All => {}
            IssueFilter::Errors => issues.retain(|d| d.severity.is_error()),
            IssueFilter::Warnings => issues.retain(|d| !d.severity.is_error()),
        }
        issues
    }

    /// Sorted diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        let mut issues = self.sorted();
        issues.retain(|d| d.kind == kind);
        issues
    }

    /// Returns `true` if any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if any warning or info was reported.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of warnings and infos.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::empty()
    }
}
