//! Validator adapter in the "standard schema" shape
//!
//! Wraps scope validation behind a schema object that never fails outward:
//! success carries the collapsed scope list, any failure becomes a single
//! issue holding the configured message. The specific error is not exposed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::scope::ScopeTree;
use crate::value::validate_scope_values;

/// Message used when none is configured
pub const DEFAULT_MESSAGE: &str = "Invalid scopes";

/// Vendor reported by [`ScopesSchema`]
pub const VENDOR: &str = "typescope";

/// Type tag of [`ScopesSchema`]
pub const SCHEMA_KIND: &str = "scopes";

/// Version of the standard schema interface implemented here
pub const STANDARD_SCHEMA_VERSION: u32 = 1;

/// Configuration for a scopes schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Message reported for any validation failure
    pub message: String,

    /// Vendor name reported through [`StandardSchema::vendor`]
    pub vendor: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            vendor: VENDOR.to_string(),
        }
    }
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
}

/// Outcome of [`StandardSchema::validate`]
///
/// Serializes as `{ "value": ... }` or `{ "issues": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation<T> {
    Value(T),
    Issues(Vec<Issue>),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns the validated value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Issues(_) => None,
        }
    }

    /// Returns the issues; empty on success
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Value(_) => &[],
            Self::Issues(issues) => issues,
        }
    }

    pub fn into_result(self) -> std::result::Result<T, Vec<Issue>> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Issues(issues) => Err(issues),
        }
    }
}

/// Synchronous validator that reports problems as issues instead of errors
pub trait StandardSchema {
    /// Type produced on success
    type Output;

    /// Interface version
    fn version(&self) -> u32 {
        STANDARD_SCHEMA_VERSION
    }

    /// Name of the library providing the schema
    fn vendor(&self) -> &str;

    /// Validates an arbitrary value
    fn validate(&self, value: &Value) -> Validation<Self::Output>;
}

/// Schema accepting a list of scopes valid in a [`ScopeTree`]
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use typescope::{create_scopes_schema, ScopeBranch, ScopeTree, StandardSchema, Validation};
///
/// let tree = ScopeTree::new(
///     ScopeBranch::new().with_branch("user", ScopeBranch::new().with_leaf("read", "Read user data")),
///     "Full access",
/// )
/// .unwrap();
/// let schema = create_scopes_schema(tree, Some("Scopes error"));
///
/// assert_eq!(
///     schema.validate(&json!(["user:read"])),
///     Validation::Value(vec!["user:read".to_string()])
/// );
/// assert_eq!(schema.validate(&json!(["user:nope"])).issues()[0].message, "Scopes error");
/// ```
#[derive(Debug, Clone)]
pub struct ScopesSchema {
    tree: Arc<ScopeTree>,
    config: SchemaConfig,
}

impl ScopesSchema {
    /// Creates a schema over a shared tree
    pub fn new(tree: Arc<ScopeTree>, config: SchemaConfig) -> Self {
        Self { tree, config }
    }

    /// Type tag, always `"scopes"`
    pub fn kind(&self) -> &'static str {
        SCHEMA_KIND
    }

    /// Message reported for any failure
    pub fn message(&self) -> &str {
        &self.config.message
    }

    pub fn tree(&self) -> &Arc<ScopeTree> {
        &self.tree
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

impl StandardSchema for ScopesSchema {
    type Output = Vec<String>;

    fn vendor(&self) -> &str {
        &self.config.vendor
    }

    fn validate(&self, value: &Value) -> Validation<Vec<String>> {
        match validate_scope_values(&self.tree, value) {
            Ok(scopes) => Validation::Value(scopes),
            Err(err) => {
                debug!(error = %err, "scope validation failed");
                Validation::Issues(vec![Issue {
                    message: self.config.message.clone(),
                }])
            }
        }
    }
}

/// Creates a [`ScopesSchema`], using [`DEFAULT_MESSAGE`] when `message` is `None`
pub fn create_scopes_schema(tree: impl Into<Arc<ScopeTree>>, message: Option<&str>) -> ScopesSchema {
    let config = SchemaConfig {
        message: message.unwrap_or(DEFAULT_MESSAGE).to_string(),
        ..SchemaConfig::default()
    };
    ScopesSchema::new(tree.into(), config)
}
