//! Diagnostics data model.
//!
//! A [`Diagnostic`] is one reported issue, addressed by a 1-based `(line, column)` position.
//! Its [`DiagnosticKind`] says which rule family produced it; its [`Severity`] says how a host
//! should present it. The two are independent: a `deprecated` finding is a `warning`, a
//! `best-practice` finding is `info`, and only `syntax` findings are `error`s.
//!
//! All enums serialize to the wire strings used by editor front ends
//! (`"roblox-api"`, `"best-practice"`, `"LUA_SYNTAX"`, ...).

use crate::line_index::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of the rule that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// The source failed to parse (or validation itself failed).
    Syntax,
    /// Generic warning.
    Warning,
    /// Suspicious Roblox API usage (unknown service, client-only accessor).
    RobloxApi,
    /// Use of a legacy API with a modern replacement.
    Deprecated,
    /// Style or performance advice.
    BestPractice,
}

impl DiagnosticKind {
    /// Wire string (`"roblox-api"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Warning => "warning",
            Self::RobloxApi => "roblox-api",
            Self::Deprecated => "deprecated",
            Self::BestPractice => "best-practice",
        }
    }

    /// Human label for problem panels.
    pub fn label(self) -> &'static str {
        match self {
            Self::Syntax => "Syntax",
            Self::Warning => "Warning",
            Self::RobloxApi => "Roblox API",
            Self::Deprecated => "Deprecated",
            Self::BestPractice => "Best Practice",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display/blocking priority of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks validity.
    Error,
    /// Advisory.
    Warning,
    /// Informational.
    Info,
}

impl Severity {
    /// Wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// The source failed to parse.
    #[serde(rename = "LUA_SYNTAX")]
    LuaSyntax,
    /// A deprecated API was used.
    #[serde(rename = "DEPRECATED_API")]
    DeprecatedApi,
    /// `GetService` was called with an unrecognized service name.
    #[serde(rename = "UNKNOWN_SERVICE")]
    UnknownService,
    /// The client-only `LocalPlayer` accessor was referenced.
    #[serde(rename = "LOCALPLAYER_SERVER")]
    LocalPlayerServer,
    /// A best-practice pattern matched.
    #[serde(rename = "BEST_PRACTICE")]
    BestPractice,
}

impl DiagnosticCode {
    /// Wire string (`"LUA_SYNTAX"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LuaSyntax => "LUA_SYNTAX",
            Self::DeprecatedApi => "DEPRECATED_API",
            Self::UnknownService => "UNKNOWN_SERVICE",
            Self::LocalPlayerServer => "LOCALPLAYER_SERVER",
            Self::BestPractice => "BEST_PRACTICE",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message used when validation itself fails.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Message used when a parser reports a failure without text.
pub const SYNTAX_ERROR_FALLBACK_MESSAGE: &str = "Syntax error";

/// A single reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    /// 1-based column, in Unicode scalar values (`char`) from the start of the line.
    pub column: usize,
    /// Human-readable description.
    pub message: String,
    /// Rule family.
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Presentation priority.
    pub severity: Severity,
    /// Optional rule identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<DiagnosticCode>,
}

impl Diagnostic {
    /// Create a diagnostic at `position`.
    pub fn new(
        position: Position,
        message: impl Into<String>,
        kind: DiagnosticKind,
        severity: Severity,
        code: Option<DiagnosticCode>,
    ) -> Self {
        Self {
            line: position.line,
            column: position.column,
            message: message.into(),
            kind,
            severity,
            code,
        }
    }

    /// The synthetic error reported when validation itself fails.
    pub fn validation_failed() -> Self {
        Self::new(
            Position::START,
            VALIDATION_FAILED_MESSAGE,
            DiagnosticKind::Syntax,
            Severity::Error,
            None,
        )
    }

    /// Position of this diagnostic.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.severity)?;
        if let Some(code) = self.code {
            write!(f, " [{code}]")?;
        }
        write!(f, " {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings_match_serde() {
        let diagnostic = Diagnostic::new(
            Position::new(3, 7),
            "Use task.wait() instead of wait()",
            DiagnosticKind::RobloxApi,
            Severity::Info,
            Some(DiagnosticCode::LocalPlayerServer),
        );
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["column"], 7);
        assert_eq!(json["type"], DiagnosticKind::RobloxApi.as_str());
        assert_eq!(json["severity"], Severity::Info.as_str());
        assert_eq!(json["code"], DiagnosticCode::LocalPlayerServer.as_str());

        let back: Diagnostic = serde_json::from_value(json).unwrap();
        assert_eq!(back, diagnostic);
    }

    #[test]
    fn test_missing_code_is_omitted() {
        let json = serde_json::to_value(Diagnostic::validation_failed()).unwrap();
        assert!(json.get("code").is_none());
        assert_eq!(json["type"], "syntax");
        assert_eq!(json["message"], VALIDATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            Position::new(1, 1),
            "Use task.wait() instead of wait()",
            DiagnosticKind::Deprecated,
            Severity::Warning,
            Some(DiagnosticCode::DeprecatedApi),
        );
        assert_eq!(
            diagnostic.to_string(),
            "1:1: warning [DEPRECATED_API] Use task.wait() instead of wait()"
        );
        assert_eq!(DiagnosticKind::BestPractice.label(), "Best Practice");
    }
}
