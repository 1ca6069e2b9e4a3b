//! Validator configuration.
//!
//! The default configuration runs every rule category against the built-in Roblox tables.
//! Categories can be switched off individually, in code or from a JSON document:
//!
//! ```json
//! { "bestPractice": false, "localPlayer": false }
//! ```

use rbx_validator_rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while loading a [`ValidatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config document is not valid JSON for [`ValidatorConfig`].
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    /// An unrecognized rule category name.
    #[error("unknown rule category '{0}'")]
    UnknownCategory(String),
}

/// A rule category that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Full-text syntax check.
    Syntax,
    /// Deprecated API table.
    DeprecatedApi,
    /// Best-practice table.
    BestPractice,
    /// `GetService` name vetting.
    UnknownService,
    /// Client-only `LocalPlayer` references.
    LocalPlayer,
}

impl RuleCategory {
    /// Every category, in reporting order.
    pub const ALL: [RuleCategory; 5] = [
        Self::Syntax,
        Self::DeprecatedApi,
        Self::BestPractice,
        Self::UnknownService,
        Self::LocalPlayer,
    ];

    /// Kebab-case name (`"deprecated-api"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::DeprecatedApi => "deprecated-api",
            Self::BestPractice => "best-practice",
            Self::UnknownService => "unknown-service",
            Self::LocalPlayer => "local-player",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownCategory(s.to_string()))
    }
}

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Run the syntax check.
    pub syntax: bool,
    /// Apply the deprecated-API table.
    pub deprecated_api: bool,
    /// Apply the best-practice table.
    pub best_practice: bool,
    /// Vet `GetService` names.
    pub unknown_service: bool,
    /// Report `LocalPlayer` references.
    pub local_player: bool,
    /// Rule tables to scan with.
    #[serde(skip)]
    pub rules: RuleSet,
}

impl ValidatorConfig {
    /// Every category enabled, built-in Roblox tables.
    pub fn new() -> Self {
        Self {
            syntax: true,
            deprecated_api: true,
            best_practice: true,
            unknown_service: true,
            local_player: true,
            rules: RuleSet::roblox(),
        }
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Use different rule tables.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Enable or disable a category (builder form).
    pub fn with_category(mut self, category: RuleCategory, enabled: bool) -> Self {
        self.set_enabled(category, enabled);
        self
    }

    /// Disable a category (builder form).
    pub fn without(self, category: RuleCategory) -> Self {
        self.with_category(category, false)
    }

    /// Enable or disable a category.
    pub fn set_enabled(&mut self, category: RuleCategory, enabled: bool) {
        *self.flag_mut(category) = enabled;
    }

    /// Returns `true` if `category` is enabled.
    pub fn is_enabled(&self, category: RuleCategory) -> bool {
        match category {
            RuleCategory::Syntax => self.syntax,
            RuleCategory::DeprecatedApi => self.deprecated_api,
            RuleCategory::BestPractice => self.best_practice,
            RuleCategory::UnknownService => self.unknown_service,
            RuleCategory::LocalPlayer => self.local_player,
        }
    }

    fn flag_mut(&mut self, category: RuleCategory) -> &mut bool {
        match category {
            RuleCategory::Syntax => &mut self.syntax,
            RuleCategory::DeprecatedApi => &mut self.deprecated_api,
            RuleCategory::BestPractice => &mut self.best_practice,
            RuleCategory::UnknownService => &mut self.unknown_service,
            RuleCategory::LocalPlayer => &mut self.local_player,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
