//! Roblox-specific checks: `GetService` name vetting and client-only accessor references.

use crate::ValidatorError;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, Severity};
use crate::line_index::LineIndex;
use crate::scanner::compile;
use rbx_validator_rules::{LOCAL_PLAYER_MESSAGE, RuleSet, ServiceRoot};
use regex::Regex;

#[derive(Debug, Clone)]
struct ServiceLookup {
    root: &'static ServiceRoot,
    regex: Regex,
}

/// Compiled Roblox API checks.
#[derive(Debug, Clone)]
pub struct RobloxChecks {
    lookups: Vec<ServiceLookup>,
    local_player: Regex,
}

impl RobloxChecks {
    /// Compile the registry lookups and accessor pattern of `rules`.
    pub fn new(rules: &RuleSet) -> Result<Self, ValidatorError> {
        let lookups = rules
            .service_roots
            .iter()
            .map(|root| -> Result<ServiceLookup, ValidatorError> {
                let pattern = RuleSet::service_lookup_pattern(&regex::escape(root.name));
                Ok(ServiceLookup {
                    root,
                    regex: compile(&pattern)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lookups,
            local_player: compile(rules.local_player_pattern)?,
        })
    }

    /// Flag `GetService` lookups whose name is neither known nor a near-miss of a known service.
    ///
    /// A fuzzy (case-insensitive substring) match suppresses the diagnostic, trading missed typos
    /// for fewer false positives.
    pub fn scan_service_lookups(&self, source: &str, index: &LineIndex, out: &mut Vec<Diagnostic>) {
        for lookup in &self.lookups {
            for caps in lookup.regex.captures_iter(source) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let name = name.as_str();
                if lookup.root.is_known_service(name) {
                    continue;
                }
                if !lookup.root.fuzzy_matches(name).is_empty() {
                    tracing::trace!(service = name, "service name is a near-miss, not flagged");
                    continue;
                }

                out.push(Diagnostic::new(
                    index.position_at_byte(whole.start()),
                    format!("Unknown service \"{name}\". Check if the service name is correct."),
                    DiagnosticKind::RobloxApi,
                    Severity::Warning,
                    Some(DiagnosticCode::UnknownService),
                ));
            }
        }
    }

    /// Flag every `LocalPlayer` reference; the script's execution context is unknown.
    pub fn scan_local_player(&self, source: &str, index: &LineIndex, out: &mut Vec<Diagnostic>) {
        for m in self.local_player.find_iter(source) {
            out.push(Diagnostic::new(
                index.position_at_byte(m.start()),
                LOCAL_PLAYER_MESSAGE,
                DiagnosticKind::RobloxApi,
                Severity::Warning,
                Some(DiagnosticCode::LocalPlayerServer),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_index::Position;

    fn checks() -> RobloxChecks {
        RobloxChecks::new(&RuleSet::roblox()).unwrap()
    }

    fn lookups(source: &str) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        checks().scan_service_lookups(source, &LineIndex::from_text(source), &mut out);
        out
    }

    fn local_player(source: &str) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        checks().scan_local_player(source, &LineIndex::from_text(source), &mut out);
        out
    }

    #[test]
    fn test_unknown_service_is_flagged() {
        let out = lookups("local p = game:GetService(\"Plyers\")");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, Some(DiagnosticCode::UnknownService));
        assert_eq!(out[0].position(), Position::new(1, 11));
        assert_eq!(
            out[0].message,
            "Unknown service \"Plyers\". Check if the service name is correct."
        );
    }

    #[test]
    fn test_known_and_near_miss_services_pass() {
        assert!(lookups("game:GetService(\"Players\")").is_empty());
        assert!(lookups("game:GetService('RunService')").is_empty());
        assert!(lookups("game:GetService(\"Player\")").is_empty());
        assert!(lookups("game:GetService(\"tweenservice\")").is_empty());
    }

    #[test]
    fn test_single_quoted_lookup_is_checked() {
        let out = lookups("\n  game:GetService('Nope')");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position(), Position::new(2, 3));
    }

    #[test]
    fn test_local_player_both_forms() {
        let source = "local a = game.Players.LocalPlayer\nlocal b = game:GetService(\"Players\").LocalPlayer";
        let out = local_player(source);
        let positions: Vec<_> = out.iter().map(|d| d.position()).collect();
        assert_eq!(positions, vec![Position::new(1, 11), Position::new(2, 11)]);
        assert!(out.iter().all(|d| d.kind == DiagnosticKind::RobloxApi));
        assert!(out.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_local_player_is_not_suppressed_in_local_scripts() {
        // There is no notion of script type; every reference is reported.
        let out = local_player("-- LocalScript\nlocal p = game.Players.LocalPlayer\nprint(game.Players.LocalPlayer.Name)");
        assert_eq!(out.len(), 2);
    }

    static PARENT_ROOTS: &[ServiceRoot] = &[ServiceRoot {
        name: "script.Parent",
        methods: &["GetService"],
        services: &["Inventory"],
    }];

    #[test]
    fn test_root_names_match_literally() {
        let rules = RuleSet {
            service_roots: PARENT_ROOTS,
            ..RuleSet::roblox()
        };
        let checks = RobloxChecks::new(&rules).unwrap();
        let scan = |source: &str| {
            let mut out = Vec::new();
            checks.scan_service_lookups(source, &LineIndex::from_text(source), &mut out);
            out
        };

        // "." in the root name is not a wildcard.
        assert!(scan("scriptXParent:GetService(\"Bank\")").is_empty());

        let out = scan("local b = script.Parent:GetService(\"Bank\")");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position(), Position::new(1, 11));
        assert!(scan("script.Parent:GetService(\"Inventory\")").is_empty());
    }
}
