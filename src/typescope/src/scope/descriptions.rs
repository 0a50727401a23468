//! Human-readable scope descriptions with wildcard substitution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::types::{ScopeBranch, ScopeNode, ScopeTree, SEPARATOR, WILDCARD};
use crate::error::{Result, ScopeError};

/// Descriptions resolved for a scope
///
/// Serializes untagged: a bare string for the fully-open `"*"` scope, an
/// array otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeDescriptions {
    /// The tree's all-scopes message, returned only for `"*"`
    All(String),
    /// One entry per leaf the scope resolves to
    Scoped(Vec<String>),
}

impl ScopeDescriptions {
    /// Returns whether this is the all-scopes message
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All(_))
    }

    /// Flattens into a list, wrapping the all-scopes message if needed
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::All(message) => vec![message],
            Self::Scoped(descriptions) => descriptions,
        }
    }
}

/// Resolves the descriptions of `scope`
///
/// Walks the tree segment by segment. A segment that only matches a
/// wildcard child is pushed onto the resolve stack; a `*` segment pushes
/// `all_resolve` and fans out over every leaf beneath that point, in
/// declaration order. Leaf templates have `$1`, `$2`, ... replaced from the
/// resolve stack.
///
/// Segments after a leaf are ignored, and a scope that stops on a branch
/// resolves to an empty list.
///
/// # Errors
///
/// Returns [`ScopeError::UnknownScope`] if a segment matches neither an exact
/// key nor a wildcard child.
///
/// # Examples
///
/// ```
/// use typescope::{scope_descriptions, ScopeBranch, ScopeDescriptions, ScopeTree};
///
/// let tree = ScopeTree::new(
///     ScopeBranch::new().with_branch(
///         "domain",
///         ScopeBranch::new().with_branch(
///             "*",
///             ScopeBranch::new()
///                 .with_leaf("read", "Read access to $1")
///                 .with_leaf("write", "Write access to $1"),
///         ),
///     ),
///     "Full access to everything",
/// )
/// .unwrap();
///
/// assert_eq!(
///     scope_descriptions(&tree, "domain:test:read", "ALL").unwrap(),
///     ScopeDescriptions::Scoped(vec!["Read access to test".to_string()])
/// );
/// assert_eq!(
///     scope_descriptions(&tree, "*", "ALL").unwrap(),
///     ScopeDescriptions::All("Full access to everything".to_string())
/// );
/// ```
pub fn scope_descriptions(tree: &ScopeTree, scope: &str, all_resolve: &str) -> Result<ScopeDescriptions> {
    if scope == WILDCARD {
        return Ok(ScopeDescriptions::All(tree.all_scopes_message().to_string()));
    }

    let mut descriptions = Vec::new();
    let mut resolves: Vec<&str> = Vec::new();
    let mut branch = tree.root();

    for fragment in scope.split(SEPARATOR) {
        if fragment == WILDCARD {
            resolves.push(all_resolve);
            collect_descriptions(branch, &mut resolves, all_resolve, &mut descriptions);
            break;
        }

        let step = branch
            .lookup(fragment)
            .ok_or_else(|| ScopeError::unknown_scope(scope, fragment))?;
        if step.via_wildcard {
            resolves.push(fragment);
        }

        match step.node {
            ScopeNode::Leaf(template) => {
                descriptions.push(render_description(template, &resolves));
                break;
            }
            ScopeNode::Branch(child) => branch = child,
        }
    }

    Ok(ScopeDescriptions::Scoped(descriptions))
}

impl ScopeTree {
    /// Resolves the descriptions of `scope` in this tree
    ///
    /// See [`scope_descriptions`].
    pub fn descriptions(&self, scope: &str, all_resolve: &str) -> Result<ScopeDescriptions> {
        scope_descriptions(self, scope, all_resolve)
    }
}

/// Renders every leaf under `branch`, depth first
fn collect_descriptions<'a>(
    branch: &ScopeBranch,
    resolves: &mut Vec<&'a str>,
    all_resolve: &'a str,
    out: &mut Vec<String>,
) {
    for (key, node) in branch.iter() {
        match node {
            ScopeNode::Leaf(template) => out.push(render_description(template, resolves)),
            ScopeNode::Branch(child) if key.is_wildcard() => {
                resolves.push(all_resolve);
                collect_descriptions(child, resolves, all_resolve, out);
                resolves.pop();
            }
            ScopeNode::Branch(child) => collect_descriptions(child, resolves, all_resolve, out),
        }
    }
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d+").expect("placeholder pattern is valid"));

/// Replaces `$N` with the N-th resolve (1-based)
///
/// Placeholders without a matching resolve are left as written.
pub(crate) fn render_description(template: &str, resolves: &[&str]) -> String {
    if resolves.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let token = &caps[0];
            token[1..]
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|index| resolves.get(index))
                .map_or_else(|| token.to_string(), |resolve| (*resolve).to_string())
        })
        .into_owned()
}
