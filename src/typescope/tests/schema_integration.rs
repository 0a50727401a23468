//! Integration tests for the schema adapter and the untyped entry points

use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};
use typescope::{
    create_scopes_schema, has_scope_value, scope_descriptions_value, validate_scope_values,
    ScopeError, ScopeTree, ScopesSchema, SchemaConfig, StandardSchema, Validation,
};

fn scopes_tree() -> ScopeTree {
    serde_json::from_value(json!({
        "individualScopes": {
            "user": {
                "read": "Read user data",
                "write": "Write user data",
                "delete": "Delete user data"
            },
            "domain": {
                "*": {
                    "read": "Read access to $1",
                    "write": "Write access to $1"
                }
            },
            "admin": {
                "*": "Full admin access to $1"
            }
        },
        "allScopesMessage": "Full access to everything"
    }))
    .expect("scope tree should deserialize")
}

/// Mirrors how a caller consumes a standard schema
fn validate_input<S: StandardSchema>(schema: &S, data: &Value) -> Result<S::Output, String> {
    schema
        .validate(data)
        .into_result()
        .map_err(|issues| serde_json::to_string_pretty(&issues).unwrap())
}

#[test]
fn test_schema_parses_and_collapses() {
    let schema = create_scopes_schema(scopes_tree(), Some("Scopes error"));
    let parsed = validate_input(
        &schema,
        &json!([
            "user:read",
            "domain:test:read",
            "domain:*",
            "domain:prod:read",
            "admin:*"
        ]),
    )
    .unwrap();

    assert_eq!(parsed, vec!["admin:*", "domain:*", "user:read"]);
}

#[test]
fn test_schema_failures_never_escape() {
    let schema = create_scopes_schema(scopes_tree(), Some("Scopes error"));

    let test_cases = vec![
        json!("not-an-array"),
        json!([123]),
        json!(["invalid:scope"]),
        json!(["user:read:extra"]),
        json!({ "scopes": ["user:read"] }),
    ];

    for input in test_cases {
        let result = schema.validate(&input);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "issues": [{ "message": "Scopes error" }] }),
            "input {input}"
        );
    }
}

#[test]
fn test_schema_from_config() {
    let config: SchemaConfig = serde_json::from_value(json!({
        "message": "Requested permissions are not available",
        "vendor": "acme-auth"
    }))
    .unwrap();
    let schema = ScopesSchema::new(Arc::new(scopes_tree()), config);

    assert_eq!(schema.kind(), "scopes");
    assert_eq!(schema.vendor(), "acme-auth");
    assert_eq!(schema.version(), 1);
    assert_eq!(
        schema.validate(&json!(["nope"])).issues()[0].message,
        "Requested permissions are not available"
    );
}

#[test]
fn test_schema_shared_across_threads() {
    let schema = Arc::new(create_scopes_schema(scopes_tree(), None));
    let mut handles = vec![];

    for i in 0..8 {
        let schema = Arc::clone(&schema);
        handles.push(thread::spawn(move || {
            let input = if i % 2 == 0 {
                json!([format!("domain:tenant{i}:read"), "user:*"])
            } else {
                json!([format!("tenant{i}:read")])
            };
            (i, schema.validate(&input))
        }));
    }

    for handle in handles {
        let (i, result) = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(
                result,
                Validation::Value(vec!["user:*".to_string(), format!("domain:tenant{i}:read")])
            );
        } else {
            assert_eq!(result.issues()[0].message, "Invalid scopes");
        }
    }
}

#[test]
fn test_validate_scope_values_invalid_argument() {
    let tree = scopes_tree();

    assert_eq!(
        validate_scope_values(&tree, &json!("not-an-array")),
        Err(ScopeError::InvalidArgument("scopes must be an array".to_string()))
    );
    assert_eq!(
        validate_scope_values(&tree, &json!([123])),
        Err(ScopeError::InvalidArgument(
            "scopes must be an array of strings".to_string()
        ))
    );
    assert_eq!(
        validate_scope_values(&tree, &json!(["user:read"])),
        Ok(vec!["user:read".to_string()])
    );
}

#[test]
fn test_has_scope_value_invalid_argument() {
    assert_eq!(
        has_scope_value(&json!("scope"), &json!("not-an-array")),
        Err(ScopeError::InvalidArgument(
            "granted scopes must be an array".to_string()
        ))
    );
    assert_eq!(
        has_scope_value(&json!(123), &json!(["scope"])),
        Err(ScopeError::InvalidArgument("scope must be a string".to_string()))
    );
    assert_eq!(
        has_scope_value(&json!("scope"), &json!([123])),
        Err(ScopeError::InvalidArgument(
            "granted scopes must be an array of strings".to_string()
        ))
    );
    assert_eq!(has_scope_value(&json!("domain:*"), &json!(["domain:a:read"])), Ok(true));
}

#[test]
fn test_scope_descriptions_value() {
    let tree = scopes_tree();

    assert_eq!(
        scope_descriptions_value(&tree, &json!(123), "all"),
        Err(ScopeError::InvalidArgument("scope must be a string".to_string()))
    );

    let descriptions = scope_descriptions_value(&tree, &json!("*"), "all").unwrap();
    assert_eq!(
        serde_json::to_value(descriptions).unwrap(),
        json!("Full access to everything")
    );

    let descriptions = scope_descriptions_value(&tree, &json!("user:read"), "all").unwrap();
    assert_eq!(serde_json::to_value(descriptions).unwrap(), json!(["Read user data"]));
}
