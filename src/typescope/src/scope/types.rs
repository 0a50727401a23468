//! Scope tree types and declaration validation
//!
//! A scope tree maps colon-separated segments to either nested branches or
//! leaf description templates. The wildcard child of a branch is stored under
//! [`SegmentKey::Wildcard`] rather than under a literal `"*"` string key.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScopeError};

/// Segment that stands for "this position and everything beneath it"
pub const WILDCARD: &str = "*";

/// Separator between scope segments
pub const SEPARATOR: char = ':';

/// Key of a child in a [`ScopeBranch`]
///
/// Serialized as a plain string; the literal `"*"` round-trips to
/// [`SegmentKey::Wildcard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SegmentKey {
    /// Exact segment match
    Literal(String),
    /// Matches any single segment
    Wildcard,
}

impl SegmentKey {
    /// Parses a declared key, rejecting anything that can never appear in a scope
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidSegmentKey`] if the key is empty or
    /// contains a space or a colon.
    pub fn new(key: &str) -> Result<Self> {
        let key = Self::from_declared(key);
        key.validate()?;
        Ok(key)
    }

    /// Maps `"*"` to the wildcard sentinel without validating
    fn from_declared(key: &str) -> Self {
        if key == WILDCARD {
            Self::Wildcard
        } else {
            Self::Literal(key.to_string())
        }
    }

    /// Returns whether this is the wildcard sentinel
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Returns the key as it appears in a scope string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(key) => key,
            Self::Wildcard => WILDCARD,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let Self::Literal(key) = self else {
            return Ok(());
        };

        let reason = if key.is_empty() {
            "key cannot be empty"
        } else if key == WILDCARD {
            "use SegmentKey::Wildcard for the wildcard child"
        } else if key.contains(' ') {
            "key cannot contain a space"
        } else if key.contains(SEPARATOR) {
            "key cannot contain a colon"
        } else {
            return Ok(());
        };

        Err(ScopeError::InvalidSegmentKey {
            key: key.clone(),
            reason: reason.to_string(),
        })
    }

    fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            Self::Literal(key) => KeyRef::Literal(key),
            Self::Wildcard => KeyRef::Wildcard,
        }
    }
}

impl Hash for SegmentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key_ref().hash(state);
    }
}

impl TryFrom<String> for SegmentKey {
    type Error = ScopeError;

    fn try_from(key: String) -> Result<Self> {
        Self::new(&key)
    }
}

impl From<SegmentKey> for String {
    fn from(key: SegmentKey) -> Self {
        match key {
            SegmentKey::Literal(key) => key,
            SegmentKey::Wildcard => WILDCARD.to_string(),
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed lookup key, hashed identically to [`SegmentKey`]
#[derive(Hash, PartialEq, Eq)]
enum KeyRef<'a> {
    Literal(&'a str),
    Wildcard,
}

impl Equivalent<SegmentKey> for KeyRef<'_> {
    fn equivalent(&self, key: &SegmentKey) -> bool {
        *self == key.as_key_ref()
    }
}

/// A node of the scope tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeNode {
    /// Description template; `$1`, `$2`, ... are filled from wildcard resolves
    Leaf(String),
    /// Nested segments
    Branch(ScopeBranch),
}

/// Ordered children of one tree level
///
/// Children keep their declaration order, which is the order descriptions
/// are produced in when a wildcard scope fans out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeBranch {
    children: IndexMap<SegmentKey, ScopeNode>,
}

/// Result of looking a scope segment up in a branch
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step<'t> {
    pub node: &'t ScopeNode,
    /// The segment matched the wildcard child, not an exact key
    pub via_wildcard: bool,
}

impl ScopeBranch {
    /// Creates an empty branch
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf; `"*"` declares the wildcard child
    pub fn with_leaf(mut self, key: &str, description: impl Into<String>) -> Self {
        self.insert(SegmentKey::from_declared(key), ScopeNode::Leaf(description.into()));
        self
    }

    /// Adds a nested branch; `"*"` declares the wildcard child
    pub fn with_branch(mut self, key: &str, branch: ScopeBranch) -> Self {
        self.insert(SegmentKey::from_declared(key), ScopeNode::Branch(branch));
        self
    }

    /// Inserts a child, returning the node it replaced
    pub fn insert(&mut self, key: SegmentKey, node: ScopeNode) -> Option<ScopeNode> {
        self.children.insert(key, node)
    }

    /// Returns the child declared under exactly `segment`
    pub fn get(&self, segment: &str) -> Option<&ScopeNode> {
        self.children.get(&KeyRef::Literal(segment))
    }

    /// Returns the wildcard child, if declared
    pub fn wildcard(&self) -> Option<&ScopeNode> {
        self.children.get(&KeyRef::Wildcard)
    }

    /// Exact key first, falling back to the wildcard child
    pub(crate) fn lookup(&self, segment: &str) -> Option<Step<'_>> {
        if let Some(node) = self.get(segment) {
            return Some(Step { node, via_wildcard: false });
        }

        self.wildcard().map(|node| Step { node, via_wildcard: true })
    }

    /// Iterates children in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&SegmentKey, &ScopeNode)> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn validate_keys(&self) -> Result<()> {
        for (key, node) in &self.children {
            key.validate()?;
            if let ScopeNode::Branch(branch) = node {
                branch.validate_keys()?;
            }
        }
        Ok(())
    }

    fn collect_legal_scopes(&self, prefix: &str, wildcard_sample: &str, out: &mut Vec<String>) {
        for (key, node) in &self.children {
            let segment = match key {
                SegmentKey::Literal(key) => key.as_str(),
                SegmentKey::Wildcard => wildcard_sample,
            };
            let path = if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{prefix}{SEPARATOR}{segment}")
            };

            match node {
                ScopeNode::Leaf(_) => out.push(path),
                ScopeNode::Branch(branch) => {
                    out.push(format!("{path}{SEPARATOR}{WILDCARD}"));
                    branch.collect_legal_scopes(&path, wildcard_sample, out);
                }
            }
        }
    }
}

/// Declared scope schema
///
/// Built once and shared read-only; no operation mutates it.
///
/// # Examples
///
/// ```
/// use typescope::{ScopeBranch, ScopeTree};
///
/// let tree = ScopeTree::new(
///     ScopeBranch::new()
///         .with_branch(
///             "user",
///             ScopeBranch::new()
///                 .with_leaf("read", "Read user data")
///                 .with_leaf("write", "Write user data"),
///         )
///         .with_branch(
///             "domain",
///             ScopeBranch::new().with_branch(
///                 "*",
///                 ScopeBranch::new().with_leaf("read", "Read access to $1"),
///             ),
///         ),
///     "Full access to everything",
/// )
/// .unwrap();
///
/// assert_eq!(tree.all_scopes_message(), "Full access to everything");
/// assert!(tree.root().get("user").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeTree {
    individual_scopes: ScopeBranch,
    all_scopes_message: String,
}

impl ScopeTree {
    /// Creates a tree, checking every declared key
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidSegmentKey`] for an empty key or a key
    /// containing a space or a colon.
    pub fn new(individual_scopes: ScopeBranch, all_scopes_message: impl Into<String>) -> Result<Self> {
        individual_scopes.validate_keys()?;

        Ok(Self {
            individual_scopes,
            all_scopes_message: all_scopes_message.into(),
        })
    }

    /// Returns the root level of the tree
    pub fn root(&self) -> &ScopeBranch {
        &self.individual_scopes
    }

    /// Description returned for the fully-open `"*"` scope
    pub fn all_scopes_message(&self) -> &str {
        &self.all_scopes_message
    }

    /// Lists every scope string the tree accepts
    ///
    /// Yields `"*"`, a `prefix:*` entry for every branch and the full path of
    /// every leaf, in declaration order. Wildcard keys are instantiated with
    /// `wildcard_sample`, which should not collide with a declared key.
    pub fn legal_scopes(&self, wildcard_sample: &str) -> Vec<String> {
        let mut scopes = vec![WILDCARD.to_string()];
        self.individual_scopes
            .collect_legal_scopes("", wildcard_sample, &mut scopes);
        scopes
    }
}
