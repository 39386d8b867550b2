//! Result and error types for MCC goal synthesis.

use thiserror::Error;

/// Result type for MCC operations
pub type MccResult<T> = Result<T, MccError>;

/// Errors that can occur while building or scoring MCC goals
#[derive(Debug, Error)]
pub enum MccError {
    /// A required input was empty or otherwise unusable
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// An instruction token could not be parsed
    #[error("Malformed token {token:?}: {reason}")]
    MalformedToken {
        /// The offending token text
        token: String,
        /// Why it was rejected
        reason: String,
    },

    /// A decision handle belongs to a different class or method than its goal
    #[error(
        "Decision {branch} belongs to {actual_class}.{actual_method}, expected {expected_class}.{expected_method}"
    )]
    MethodMismatch {
        /// Branch whose handle disagreed
        branch: String,
        /// Class the goal was built for
        expected_class: String,
        /// Method the goal was built for
        expected_method: String,
        /// Class reported by the handle
        actual_class: String,
        /// Method reported by the handle
        actual_method: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Token pattern compilation error
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl MccError {
    /// Create an invalid-argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a malformed-token error
    #[must_use]
    pub fn malformed_token(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is scoped to a single goal and the batch can continue
    #[must_use]
    pub fn is_goal_scoped(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::MethodMismatch { .. })
    }
}
