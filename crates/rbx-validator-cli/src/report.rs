//! Text and JSON rendering of validation results.

use crossterm::style::Stylize;
use rbx_validator::{Diagnostic, IssueFilter, Severity, ValidationResult};
use serde::Serialize;
use std::fmt::Write;

/// The validation result for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Display path (`<stdin>` for standard input).
    pub path: String,
    /// Validation result.
    pub result: ValidationResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    path: &'a str,
    is_valid: bool,
    errors: Vec<&'a Diagnostic>,
    warnings: Vec<&'a Diagnostic>,
}

fn shown(result: &ValidationResult, filter: IssueFilter) -> (Vec<&Diagnostic>, Vec<&Diagnostic>) {
    let errors = match filter {
        IssueFilter::Warnings => Vec::new(),
        _ => result.errors.iter().collect(),
    };
    let warnings = match filter {
        IssueFilter::Errors => Vec::new(),
        _ => result.warnings.iter().collect(),
    };
    (errors, warnings)
}

/// Render reports as a JSON array.
pub fn render_json(reports: &[FileReport], filter: IssueFilter) -> serde_json::Result<String> {
    let reports: Vec<_> = reports
        .iter()
        .map(|report| {
            let (errors, warnings) = shown(&report.result, filter);
            JsonReport {
                path: &report.path,
                is_valid: report.result.is_valid,
                errors,
                warnings,
            }
        })
        .collect();
    serde_json::to_string_pretty(&reports)
}

fn severity_label(severity: Severity, color: bool) -> String {
    if !color {
        return severity.to_string();
    }
    match severity {
        Severity::Error => severity.as_str().red().bold().to_string(),
        Severity::Warning => severity.as_str().yellow().to_string(),
        Severity::Info => severity.as_str().blue().to_string(),
    }
}

/// Render reports as `path:line:column: severity [CODE] message` lines plus a summary.
pub fn render_text(reports: &[FileReport], filter: IssueFilter, color: bool) -> String {
    let mut out = String::new();
    let mut errors = 0;
    let mut warnings = 0;

    for report in reports {
        errors += report.result.error_count();
        warnings += report.result.warning_count();

        for diagnostic in report.result.filtered(filter) {
            let _ = write!(
                out,
                "{}:{}:{}: {}",
                report.path,
                diagnostic.line,
                diagnostic.column,
                severity_label(diagnostic.severity, color)
            );
            if let Some(code) = diagnostic.code {
                let _ = write!(out, " [{code}]");
            }
            let _ = writeln!(out, " {}", diagnostic.message);
        }
    }

    let _ = writeln!(
        out,
        "{errors} error(s), {warnings} warning(s) in {} file(s)",
        reports.len()
    );
    out
}
