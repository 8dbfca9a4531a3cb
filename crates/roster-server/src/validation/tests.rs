// crates/roster-server/src/validation/tests.rs
// ============================================================================
// Module: Payload Validation Unit Tests
// Description: Schema coverage for employee, metrics, and simulation bodies.
// Purpose: Ensure each failure is attributed to the offending property.
// Dependencies: roster-server, serde_json
// ============================================================================

//! ## Overview
//! Validates representative good and bad bodies against the compiled schemas.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use serde_json::json;

use super::PayloadValidator;

fn validator() -> PayloadValidator {
    PayloadValidator::new().expect("schemas compile")
}

fn failing_paths(result: Result<(), Vec<crate::error::FieldError>>) -> Vec<String> {
    result.expect_err("expected failures").into_iter().map(|error| error.path).collect()
}

#[test]
fn minimal_employee_is_valid() {
    let body = json!({
        "name": "Jane Doe",
        "title": "Engineer",
        "department": "Engineering",
        "email": "jane@x.com"
    });
    assert!(validator().validate_new_employee(&body).is_ok());
}

#[test]
fn full_employee_is_valid() {
    let body = json!({
        "name": "Jane Doe",
        "title": "Engineer",
        "department": "Engineering",
        "email": "jane@x.com",
        "status": "remote",
        "skills": ["Rust", "SQL"],
        "avatar": null,
        "bio": "Hi",
        "location": null,
        "apiSources": {"twitter": "success"},
        "unknown": 42
    });
    assert!(validator().validate_new_employee(&body).is_ok());
}

#[test]
fn missing_required_fields_are_each_reported() {
    let body = json!({"name": "Jane Doe", "title": "Engineer"});
    assert_eq!(
        failing_paths(validator().validate_new_employee(&body)),
        vec!["department", "email"]
    );
}

#[test]
fn type_failures_name_the_property() {
    let body = json!({
        "name": 5,
        "title": "Engineer",
        "department": "Engineering",
        "email": "jane@x.com",
        "status": "busy",
        "skills": ["ok", 3],
        "apiSources": {"twitter": true}
    });
    let paths = failing_paths(validator().validate_new_employee(&body));
    for field in ["name", "status", "skills", "apiSources"] {
        assert!(paths.iter().any(|path| path == field), "missing failure for {field}");
    }
    assert!(!paths.iter().any(|path| path == "title"));
}

#[test]
fn patch_allows_partial_bodies_but_not_nulls_for_required_fields() {
    let validator = validator();
    assert!(validator.validate_employee_patch(&json!({})).is_ok());
    assert!(validator.validate_employee_patch(&json!({"bio": null})).is_ok());
    assert_eq!(failing_paths(validator.validate_employee_patch(&json!({"name": null}))), vec![
        "name"
    ]);
}

#[test]
fn non_object_bodies_fail_at_the_root() {
    let validator = validator();
    assert_eq!(failing_paths(validator.validate_new_employee(&json!([1, 2]))), vec![""]);
    assert_eq!(failing_paths(validator.validate_metrics_patch(&json!("x"))), vec![""]);
}

#[test]
fn metrics_patch_checks_types() {
    let validator = validator();
    assert!(validator.validate_metrics_patch(&json!({"tti": "0.9s", "wcagCompliant": false})).is_ok());
    assert_eq!(
        failing_paths(validator.validate_metrics_patch(&json!({"wcagCompliant": "yes"}))),
        vec!["wcagCompliant"]
    );
}

#[test]
fn simulation_sources_must_be_strings() {
    let validator = validator();
    assert!(validator.validate_simulation(&json!({})).is_ok());
    assert!(validator.validate_simulation(&json!({"sources": []})).is_ok());
    assert_eq!(failing_paths(validator.validate_simulation(&json!({"sources": "imdb"}))), vec![
        "sources"
    ]);
    assert_eq!(failing_paths(validator.validate_simulation(&json!({"sources": [1]}))), vec![
        "sources"
    ]);
}
