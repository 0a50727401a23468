//! Error types for scope validation, matching and description lookup

use thiserror::Error;

/// Result type alias for scope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Errors raised while working with scopes and scope trees
///
/// Any single invalid scope is fatal to the whole call that raised it; no
/// operation returns partial results alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Caller passed a non-sequence or non-string where one is required
    #[error("{0}")]
    InvalidArgument(String),

    /// A scope segment has no matching key (exact or wildcard) in the tree
    #[error("Scope {scope} is not valid because the scope fragment {fragment} does not exist.")]
    UnknownScope { scope: String, fragment: String },

    /// A scope continues past a leaf of the tree
    #[error("Scope {scope} is not valid because it hit a leaf and there are more scope fragments.")]
    MalformedScope { scope: String },

    /// A tree was declared with a key that can never appear in a scope string
    #[error("invalid scope tree key '{key}': {reason}")]
    InvalidSegmentKey { key: String, reason: String },
}

impl ScopeError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn unknown_scope(scope: &str, fragment: &str) -> Self {
        Self::UnknownScope {
            scope: scope.to_string(),
            fragment: fragment.to_string(),
        }
    }

    pub(crate) fn malformed_scope(scope: &str) -> Self {
        Self::MalformedScope {
            scope: scope.to_string(),
        }
    }
}
