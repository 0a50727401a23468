//! # Typescope
//!
//! Hierarchical, colon-delimited permission scopes (`domain:prod:read`)
//! checked against a declared scope tree.
//!
//! ## Features
//!
//! - **Validation** of untrusted scope lists against the tree
//! - **Collapsing** of scopes already covered by a `prefix:*` wildcard
//! - **Containment checks** with wildcards on either side
//! - **Descriptions** rendered from `$N` templates, fanning out over wildcards
//! - **Schema adapter** reporting failures as issues instead of errors
//!
//! ## Example
//!
//! ```rust
//! use typescope::{has_scope, scope_descriptions, validate_scopes, ScopeBranch, ScopeTree};
//!
//! # fn example() -> Result<(), typescope::ScopeError> {
//! let tree = ScopeTree::new(
//!     ScopeBranch::new()
//!         .with_branch(
//!             "user",
//!             ScopeBranch::new()
//!                 .with_leaf("read", "Read user data")
//!                 .with_leaf("write", "Write user data"),
//!         )
//!         .with_branch(
//!             "domain",
//!             ScopeBranch::new().with_branch(
//!                 "*",
//!                 ScopeBranch::new()
//!                     .with_leaf("read", "Read access to $1")
//!                     .with_leaf("write", "Write access to $1"),
//!             ),
//!         ),
//!     "Full access to everything",
//! )?;
//!
//! let granted = validate_scopes(&tree, &["user:read", "domain:prod:read", "domain:*"])?;
//! assert_eq!(granted, vec!["domain:*", "user:read"]);
//!
//! assert!(has_scope("domain:test:write", &granted));
//! assert!(!has_scope("user:write", &granted));
//!
//! let descriptions = scope_descriptions(&tree, "domain:prod:read", "all domains")?;
//! assert_eq!(descriptions.into_vec(), vec!["Read access to prod"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod schema;
pub mod scope;
pub mod value;

pub use error::{Result, ScopeError};
pub use schema::{create_scopes_schema, Issue, SchemaConfig, ScopesSchema, StandardSchema, Validation};
pub use scope::{
    has_scope, scope_descriptions, validate_scopes, ScopeBranch, ScopeDescriptions, ScopeNode,
    ScopeTree, SegmentKey, SEPARATOR, WILDCARD,
};
pub use value::{has_scope_value, scope_descriptions_value, validate_scope_values};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
