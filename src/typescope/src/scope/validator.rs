//! Scope validation against a tree, with wildcard collapsing

use tracing::{debug, trace};

use super::types::{ScopeBranch, ScopeNode, ScopeTree, SEPARATOR, WILDCARD};
use crate::error::{Result, ScopeError};

/// How the walk of a single scope ended
#[derive(Debug, PartialEq, Eq)]
enum Walk {
    /// Reached a leaf with no segments left
    Leaf,
    /// Reached a `*` segment; `prefix` is what was consumed before it
    Wildcard { prefix: String },
    /// An accepted `prefix:*` already covers this scope
    Collapsed { ancestor: String },
    /// Ran out of segments (or hit an empty one) while still on a branch
    Incomplete,
}

/// Validates untrusted scopes against `tree` and collapses redundant ones
///
/// Scopes are processed shortest first (stable by UTF-16 length) so that a
/// `prefix:*` scope is accepted before the longer scopes it covers, which
/// are then dropped. The result keeps that processing order.
///
/// Scopes that stop on a branch without a wildcard (`"user"`, `"user:"`)
/// name no permission and are dropped without error.
///
/// # Errors
///
/// - [`ScopeError::UnknownScope`] if a segment matches neither an exact key
///   nor a wildcard child
/// - [`ScopeError::MalformedScope`] if a scope continues past a leaf
///
/// One bad scope fails the whole call.
///
/// # Examples
///
/// ```
/// use typescope::{validate_scopes, ScopeBranch, ScopeTree};
///
/// let tree = ScopeTree::new(
///     ScopeBranch::new().with_branch(
///         "user",
///         ScopeBranch::new()
///             .with_leaf("read", "Read user data")
///             .with_leaf("write", "Write user data"),
///     ),
///     "Full access",
/// )
/// .unwrap();
///
/// let scopes = validate_scopes(&tree, &["user:read", "user:*"]).unwrap();
/// assert_eq!(scopes, vec!["user:*"]);
///
/// assert!(validate_scopes(&tree, &["group:read"]).is_err());
/// ```
pub fn validate_scopes<S: AsRef<str>>(tree: &ScopeTree, scopes: &[S]) -> Result<Vec<String>> {
    let mut ordered: Vec<&str> = scopes.iter().map(AsRef::as_ref).collect();
    ordered.sort_by_key(|scope| scope_length(scope));

    let mut accepted: Vec<String> = Vec::with_capacity(ordered.len());

    for scope in ordered {
        match walk_scope(tree.root(), scope, &accepted)? {
            Walk::Leaf => {
                trace!(scope, "scope accepted");
                accepted.push(scope.to_string());
            }
            Walk::Wildcard { prefix } => {
                if !prefix.is_empty() && is_trailing_wildcard(scope, &prefix) {
                    collapse_descendants(&mut accepted, &prefix);
                }
                trace!(scope, "wildcard scope accepted");
                accepted.push(scope.to_string());
            }
            Walk::Collapsed { ancestor } => {
                debug!(scope, ancestor = %ancestor, "scope collapsed under wildcard");
            }
            Walk::Incomplete => {
                debug!(scope, "scope does not reach a leaf, dropping");
            }
        }
    }

    Ok(accepted)
}

impl ScopeTree {
    /// Validates and collapses `scopes` against this tree
    ///
    /// See [`validate_scopes`].
    pub fn validate_scopes<S: AsRef<str>>(&self, scopes: &[S]) -> Result<Vec<String>> {
        validate_scopes(self, scopes)
    }
}

/// Walks one scope from the root
fn walk_scope(root: &ScopeBranch, scope: &str, accepted: &[String]) -> Result<Walk> {
    let mut fragments = scope.split(SEPARATOR).peekable();
    let mut branch = root;
    let mut prefix = String::with_capacity(scope.len());

    while let Some(fragment) = fragments.next() {
        if fragment.is_empty() {
            return Ok(Walk::Incomplete);
        }

        if fragment == WILDCARD {
            return Ok(Walk::Wildcard { prefix });
        }

        if !prefix.is_empty() {
            prefix.push(SEPARATOR);
        }
        prefix.push_str(fragment);

        let ancestor = format!("{prefix}{SEPARATOR}{WILDCARD}");
        if accepted.contains(&ancestor) {
            return Ok(Walk::Collapsed { ancestor });
        }

        let step = branch
            .lookup(fragment)
            .ok_or_else(|| ScopeError::unknown_scope(scope, fragment))?;

        match step.node {
            ScopeNode::Leaf(_) => {
                if fragments.peek().is_some() {
                    return Err(ScopeError::malformed_scope(scope));
                }
                return Ok(Walk::Leaf);
            }
            ScopeNode::Branch(child) => branch = child,
        }
    }

    Ok(Walk::Incomplete)
}

/// Length in UTF-16 code units, the unit scope lists are ordered by
fn scope_length(scope: &str) -> usize {
    scope.encode_utf16().count()
}

/// `scope` is exactly `prefix:*`
fn is_trailing_wildcard(scope: &str, prefix: &str) -> bool {
    scope
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .is_some_and(|rest| rest == WILDCARD)
}

/// Drops accepted scopes under `prefix`
///
/// Only equal-length scopes can reach this point, since longer descendants
/// are processed after the wildcard and collapse during their own walk.
fn collapse_descendants(accepted: &mut Vec<String>, prefix: &str) {
    accepted.retain(|existing| {
        let covered = existing
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(SEPARATOR));
        if covered {
            debug!(scope = %existing, prefix, "scope collapsed under later wildcard");
        }
        !covered
    });
}
