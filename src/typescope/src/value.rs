//! Entry points for untyped input
//!
//! Scopes arriving as JSON (request bodies, token claims) are checked for
//! shape here before reaching the typed functions, which is the only place
//! [`ScopeError::InvalidArgument`] can originate.

use serde_json::Value;

use crate::error::{Result, ScopeError};
use crate::scope::{has_scope, scope_descriptions, validate_scopes, ScopeDescriptions, ScopeTree};

/// Validates a JSON array of scope strings against `tree`
///
/// # Errors
///
/// [`ScopeError::InvalidArgument`] if `scopes` is not an array of strings,
/// otherwise whatever [`validate_scopes`] returns.
pub fn validate_scope_values(tree: &ScopeTree, scopes: &Value) -> Result<Vec<String>> {
    let scopes = string_array(scopes, "scopes")?;
    validate_scopes(tree, &scopes)
}

/// Checks a JSON scope against a JSON array of granted scopes
///
/// # Errors
///
/// [`ScopeError::InvalidArgument`] if `granted` is not an array of strings or
/// `requested` is not a string.
pub fn has_scope_value(requested: &Value, granted: &Value) -> Result<bool> {
    let granted = string_array(granted, "granted scopes")?;
    let requested = scope_str(requested)?;
    Ok(has_scope(requested, &granted))
}

/// Resolves the descriptions of a JSON scope
///
/// # Errors
///
/// [`ScopeError::InvalidArgument`] if `scope` is not a string, otherwise
/// whatever [`scope_descriptions`] returns.
pub fn scope_descriptions_value(tree: &ScopeTree, scope: &Value, all_resolve: &str) -> Result<ScopeDescriptions> {
    scope_descriptions(tree, scope_str(scope)?, all_resolve)
}

fn string_array<'v>(value: &'v Value, name: &str) -> Result<Vec<&'v str>> {
    let items = value
        .as_array()
        .ok_or_else(|| ScopeError::invalid_argument(format!("{name} must be an array")))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| ScopeError::invalid_argument(format!("{name} must be an array of strings")))
        })
        .collect()
}

fn scope_str(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| ScopeError::invalid_argument("scope must be a string"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_array() {
        let value = json!(["a", "b"]);
        assert_eq!(string_array(&value, "scopes").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_string_array_not_array() {
        assert_eq!(
            string_array(&json!("not-an-array"), "scopes"),
            Err(ScopeError::InvalidArgument("scopes must be an array".to_string()))
        );
        assert!(string_array(&json!({ "0": "a" }), "scopes").is_err());
        assert!(string_array(&Value::Null, "scopes").is_err());
    }

    #[test]
    fn test_string_array_mixed_items() {
        assert_eq!(
            string_array(&json!(["a", 123]), "scopes"),
            Err(ScopeError::InvalidArgument(
                "scopes must be an array of strings".to_string()
            ))
        );
    }

    #[test]
    fn test_has_scope_value_checks_granted_first() {
        let err = has_scope_value(&json!(123), &json!("not-an-array")).unwrap_err();
        assert_eq!(err.to_string(), "granted scopes must be an array");
    }

    #[test]
    fn test_has_scope_value() {
        assert!(has_scope_value(&json!("user:read"), &json!(["user:*"])).unwrap());
        assert_eq!(
            has_scope_value(&json!(123), &json!(["scope"])).unwrap_err().to_string(),
            "scope must be a string"
        );
        assert_eq!(
            has_scope_value(&json!("scope"), &json!([123])).unwrap_err().to_string(),
            "granted scopes must be an array of strings"
        );
    }
}
