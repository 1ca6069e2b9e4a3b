//! Regex rule scanning over the whole source text.
//!
//! Rules are matched against raw text, not the syntax tree, so matches inside comments and
//! string literals are reported too.

use crate::ValidatorError;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, Severity};
use crate::line_index::LineIndex;
use rbx_validator_rules::{BestPractice, DeprecatedApi, RuleSet};
use regex::Regex;

/// A compiled pattern rule that emits one diagnostic per match.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    message: &'static str,
    kind: DiagnosticKind,
    severity: Severity,
    code: DiagnosticCode,
    bare_call: bool,
}

impl PatternRule {
    /// Compile a deprecated-API table entry.
    pub fn deprecated(api: &DeprecatedApi) -> Result<Self, ValidatorError> {
        Ok(Self {
            regex: compile(api.pattern)?,
            message: api.message,
            kind: DiagnosticKind::Deprecated,
            severity: Severity::Warning,
            code: DiagnosticCode::DeprecatedApi,
            bare_call: api.bare_call,
        })
    }

    /// Compile a best-practice table entry.
    pub fn best_practice(rule: &BestPractice) -> Result<Self, ValidatorError> {
        Ok(Self {
            regex: compile(rule.pattern)?,
            message: rule.message,
            kind: DiagnosticKind::BestPractice,
            severity: Severity::Info,
            code: DiagnosticCode::BestPractice,
            bare_call: false,
        })
    }

    /// Append one diagnostic per match, in source order.
    pub fn scan(&self, source: &str, index: &LineIndex, out: &mut Vec<Diagnostic>) {
        for m in self.regex.find_iter(source) {
            if self.bare_call && is_member_access(source, m.start()) {
                continue;
            }

            let position = index.position_at_byte(m.start());
            tracing::trace!(
                code = %self.code,
                line = position.line,
                column = position.column,
                "rule matched"
            );
            out.push(Diagnostic::new(
                position,
                self.message,
                self.kind,
                self.severity,
                Some(self.code),
            ));
        }
    }
}

/// The deprecated-API and best-practice tables, compiled.
#[derive(Debug, Clone)]
pub struct PatternScanner {
    deprecated: Vec<PatternRule>,
    best_practices: Vec<PatternRule>,
}

impl PatternScanner {
    /// Compile the tables of `rules`.
    pub fn new(rules: &RuleSet) -> Result<Self, ValidatorError> {
        let deprecated = rules
            .deprecated_apis
            .iter()
            .map(PatternRule::deprecated)
            .collect::<Result<Vec<_>, _>>()?;
        let best_practices = rules
            .best_practices
            .iter()
            .map(PatternRule::best_practice)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            deprecated,
            best_practices,
        })
    }

    /// Apply every deprecated-API rule.
    pub fn scan_deprecated(&self, source: &str, index: &LineIndex, out: &mut Vec<Diagnostic>) {
        for rule in &self.deprecated {
            rule.scan(source, index, out);
        }
    }

    /// Apply every best-practice rule.
    pub fn scan_best_practices(&self, source: &str, index: &LineIndex, out: &mut Vec<Diagnostic>) {
        for rule in &self.best_practices {
            rule.scan(source, index, out);
        }
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, ValidatorError> {
    Regex::new(pattern).map_err(|e| ValidatorError::pattern(pattern, e))
}

/// `true` if the match at `start` is the member half of `obj.name` / `obj:name`.
fn is_member_access(source: &str, start: usize) -> bool {
    source
        .get(..start)
        .and_then(|before| before.chars().next_back())
        .is_some_and(|ch| ch == '.' || ch == ':')
}
