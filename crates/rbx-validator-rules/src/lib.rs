#![warn(missing_docs)]
//! `rbx-validator-rules` - data-driven rule tables for `rbx-validator`.
//!
//! This crate intentionally stays lightweight and does **not** depend on a regex engine or any
//! parsing system. Every rule is plain `'static` data (pattern source text + message), so tables
//! can be extended by adding entries without touching the scanner that compiles and applies them.
//!
//! The built-in tables target Roblox Lua/Luau scripts:
//!
//! - [`DEPRECATED_APIS`] - legacy globals and members with a modern replacement
//! - [`BEST_PRACTICES`] - advisory patterns (input handling, busy loops, debouncing)
//! - [`ROBLOX_ROOTS`] - the known service/member registry used to vet `GetService` lookups
//!
//! [`RuleSet`] bundles them so a host can substitute its own tables per validator.

mod services;

pub use services::{ROBLOX_ROOTS, ROBLOX_SERVICES, ServiceInfo, ServiceRoot};

/// A legacy API with a modern replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedApi {
    /// Regex source (Rust `regex` syntax) matching a use of the API.
    pub pattern: &'static str,
    /// Replacement advice shown to the user.
    pub message: &'static str,
    /// Name of the deprecated API (e.g. `"wait"`).
    pub api: &'static str,
    /// Only flag bare calls.
    ///
    /// When `true`, a match immediately preceded by `.` or `:` is a member call on some other
    /// object (`task.wait(...)`) and must be skipped.
    pub bare_call: bool,
}

/// An advisory best-practice pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestPractice {
    /// Regex source (Rust `regex` syntax).
    pub pattern: &'static str,
    /// Advisory message shown to the user.
    pub message: &'static str,
}

/// Legacy APIs, in reporting order.
pub const DEPRECATED_APIS: &[DeprecatedApi] = &[
    DeprecatedApi {
        pattern: r"\bwait\s*\(",
        message: "Use task.wait() instead of wait()",
        api: "wait",
        bare_call: true,
    },
    DeprecatedApi {
        pattern: r"\bspawn\s*\(",
        message: "Use task.spawn() instead of spawn()",
        api: "spawn",
        bare_call: true,
    },
    DeprecatedApi {
        pattern: r"\bdelay\s*\(",
        message: "Use task.delay() instead of delay()",
        api: "delay",
        bare_call: true,
    },
    DeprecatedApi {
        pattern: r"\.MouseButton1Down\b",
        message: "Use Activated event instead for better touch support",
        api: "MouseButton1Down",
        bare_call: false,
    },
    DeprecatedApi {
        pattern: r"\.MouseButton1Up\b",
        message: "Use Activated event instead for better touch support",
        api: "MouseButton1Up",
        bare_call: false,
    },
    DeprecatedApi {
        pattern: r"\.KeyDown\b",
        message: "Use UserInputService.InputBegan instead",
        api: "KeyDown",
        bare_call: false,
    },
    DeprecatedApi {
        pattern: r"\.KeyUp\b",
        message: "Use UserInputService.InputEnded instead",
        api: "KeyUp",
        bare_call: false,
    },
    DeprecatedApi {
        pattern: r"\bLoadLibrary\s*\(",
        message: "LoadLibrary is deprecated, use ModuleScripts instead",
        api: "LoadLibrary",
        bare_call: true,
    },
];

/// Advisory patterns, in reporting order.
pub const BEST_PRACTICES: &[BestPractice] = &[
    BestPractice {
        pattern: r"game\.Players\.LocalPlayer\.Mouse",
        message: "Consider using UserInputService instead of Mouse for better input handling",
    },
    BestPractice {
        pattern: r"while\s+true\s+do",
        message: "Infinite loops can cause lag. Consider using RunService events instead",
    },
    BestPractice {
        pattern: r"\.Touched:Connect\(",
        message: "Touched events can fire frequently. Consider using debouncing or Region3",
    },
    BestPractice {
        pattern: r"game\.Workspace",
        message: "Use workspace instead of game.Workspace for better performance",
    },
];

/// `<root>:GetService("<name>")` lookups. `{root}` is replaced by each registry root name,
/// regex-escaped by the caller; capture group 1 is the requested service name.
pub const SERVICE_LOOKUP_TEMPLATE: &str = r#"{root}:GetService\(["']([^"']+)["']\)"#;

/// References to the client-only `LocalPlayer` accessor.
pub const LOCAL_PLAYER_PATTERN: &str =
    r#"(game\.Players\.LocalPlayer|game:GetService\("Players"\)\.LocalPlayer)"#;

/// Message attached to every `LocalPlayer` reference.
pub const LOCAL_PLAYER_MESSAGE: &str =
    "LocalPlayer is only available in LocalScripts and ModuleScripts run by LocalScripts";

/// A complete, substitutable bundle of rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// Deprecated API table.
    pub deprecated_apis: &'static [DeprecatedApi],
    /// Best-practice table.
    pub best_practices: &'static [BestPractice],
    /// Service registry roots.
    pub service_roots: &'static [ServiceRoot],
    /// Regex source for client-only accessor references.
    pub local_player_pattern: &'static str,
}

impl RuleSet {
    /// The built-in Roblox tables.
    pub const fn roblox() -> Self {
        Self {
            deprecated_apis: DEPRECATED_APIS,
            best_practices: BEST_PRACTICES,
            service_roots: ROBLOX_ROOTS,
            local_player_pattern: LOCAL_PLAYER_PATTERN,
        }
    }

    /// Look up a registry root by name (e.g. `"game"`).
    pub fn root(&self, name: &str) -> Option<&'static ServiceRoot> {
        self.service_roots.iter().find(|root| root.name == name)
    }

    /// Build the service-lookup regex source for a registry root.
    ///
    /// `escaped_root` is spliced in as regex source, so it must already be escaped.
    pub fn service_lookup_pattern(escaped_root: &str) -> String {
        SERVICE_LOOKUP_TEMPLATE.replace("{root}", escaped_root)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::roblox()
    }
}
