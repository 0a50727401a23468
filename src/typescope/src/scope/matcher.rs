//! Scope containment checks with wildcards on either side

use super::types::{SEPARATOR, WILDCARD};

/// Checks whether `requested` is covered by at least one of `granted`
///
/// Segments are compared position by position up to the length of
/// `requested`:
/// - a `*` in `requested` accepts whatever the granted scope has there
/// - a `*` in a granted scope covers everything beneath it
/// - any other difference rules that granted scope out
///
/// A wildcard on either side only ever widens the match. The tree is not
/// consulted, so neither side has to be a declared scope.
///
/// # Examples
///
/// ```
/// use typescope::has_scope;
///
/// assert!(has_scope("user:read", &["user:*"]));
/// assert!(has_scope("domain:*", &["domain:test:read"]));
/// assert!(has_scope("*", &["user:read"]));
/// assert!(!has_scope("user:write", &["user:read"]));
/// ```
pub fn has_scope<S: AsRef<str>>(requested: &str, granted: &[S]) -> bool {
    let wanted: Vec<&str> = requested.split(SEPARATOR).collect();

    granted
        .iter()
        .any(|candidate| covers(&wanted, candidate.as_ref()))
}

/// Compares one granted scope against the requested segments
fn covers(wanted: &[&str], candidate: &str) -> bool {
    let mut fragments = candidate.split(SEPARATOR);

    for &wanted_fragment in wanted {
        let fragment = fragments.next();
        if wanted_fragment == WILDCARD {
            continue;
        }

        match fragment {
            Some(WILDCARD) => return true,
            Some(fragment) if fragment == wanted_fragment => {}
            _ => return false,
        }
    }

    true
}
