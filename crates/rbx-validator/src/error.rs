use rbx_validator_treesitter::TreeSitterError;
use thiserror::Error;

/// Errors produced while building or running a [`Validator`](crate::Validator).
///
/// None of these cross the `validate` boundary: a failure during validation is reported as a
/// synthetic error diagnostic instead.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// A rule table entry failed to compile.
    #[error("invalid rule pattern '{pattern}': {source}")]
    Pattern {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error.
        #[source]
        source: regex::Error,
    },

    /// The Tree-sitter backend failed (not a syntax error in the source).
    #[error("syntax checker failed: {0}")]
    TreeSitter(#[from] TreeSitterError),

    /// A custom syntax checker backend failed.
    #[error("syntax checker failed: {0}")]
    Backend(String),

    /// The validation pipeline panicked.
    #[error("validation panicked: {0}")]
    Panic(String),
}

impl ValidatorError {
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}
