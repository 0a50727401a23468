//! Scope module for tree-backed scope validation and matching.
//!
//! This module provides:
//! - The declared scope tree (`user:read`, `domain:*:read`, ...)
//! - Containment checks with wildcards on either side
//! - Validation of untrusted scope lists, collapsing scopes under wildcards
//! - Description lookup with `$N` wildcard substitution

mod descriptions;
mod matcher;
mod types;
mod validator;

pub use descriptions::{scope_descriptions, ScopeDescriptions};
pub use matcher::has_scope;
pub use types::{ScopeBranch, ScopeNode, ScopeTree, SegmentKey, SEPARATOR, WILDCARD};
pub use validator::validate_scopes;
