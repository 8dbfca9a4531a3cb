// crates/roster-server/src/validation.rs
// ============================================================================
// Module: Payload Validation
// Description: JSON Schema validation for employee, metrics, and simulation bodies.
// Purpose: Reject malformed input with per-field errors before it reaches core.
// Dependencies: jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Each body property has its own compiled draft 2020-12 schema, so every
//! failure is reported against the property that caused it. Create requests
//! additionally require the core employee fields. Unknown properties are
//! ignored. Schemas are compiled once at startup.
//!
//! Security posture: bodies are untrusted; validation runs before any
//! deserialization into core types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::error::FieldError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Properties that must be present when creating an employee.
pub const REQUIRED_EMPLOYEE_FIELDS: [&str; 4] = ["name", "title", "department", "email"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema compilation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A built-in schema failed to compile.
    #[error("invalid schema for {field}: {message}")]
    Schema {
        /// Property the schema describes.
        field: &'static str,
        /// Compiler message.
        message: String,
    },
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Compiled property schemas for one body shape.
struct PropertySchemas {
    /// Validators keyed by property name, in declaration order.
    properties: Vec<(&'static str, Validator)>,
}

impl PropertySchemas {
    /// Compiles the given property schemas.
    fn compile(schemas: Vec<(&'static str, Value)>) -> Result<Self, ValidationError> {
        let properties = schemas
            .into_iter()
            .map(|(field, schema)| compile_schema(field, &schema).map(|validator| (field, validator)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            properties,
        })
    }

    /// Validates each present property, collecting every failure.
    fn check(&self, body: &Map<String, Value>, errors: &mut Vec<FieldError>) {
        for (field, validator) in &self.properties {
            if let Some(value) = body.get(*field) {
                errors.extend(
                    validator.iter_errors(value).map(|err| FieldError::new(*field, err.to_string())),
                );
            }
        }
    }
}

/// Request body validator for every JSON route.
pub struct PayloadValidator {
    /// Employee property schemas.
    employee: PropertySchemas,
    /// Metrics property schemas.
    metrics: PropertySchemas,
    /// Simulation request property schemas.
    simulation: PropertySchemas,
}

impl PayloadValidator {
    /// Compiles the built-in schemas.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a schema fails to compile.
    pub fn new() -> Result<Self, ValidationError> {
        Ok(Self {
            employee: PropertySchemas::compile(employee_property_schemas())?,
            metrics: PropertySchemas::compile(metrics_property_schemas())?,
            simulation: PropertySchemas::compile(simulation_property_schemas())?,
        })
    }

    /// Validates a create-employee body.
    ///
    /// # Errors
    ///
    /// Returns every field failure, including missing required fields.
    pub fn validate_new_employee(&self, body: &Value) -> Result<(), Vec<FieldError>> {
        let object = require_object(body)?;
        let mut errors: Vec<FieldError> = REQUIRED_EMPLOYEE_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| FieldError::new(*field, "Required"))
            .collect();
        self.employee.check(object, &mut errors);
        finish(errors)
    }

    /// Validates a partial employee update body.
    ///
    /// # Errors
    ///
    /// Returns every field failure.
    pub fn validate_employee_patch(&self, body: &Value) -> Result<(), Vec<FieldError>> {
        let object = require_object(body)?;
        let mut errors = Vec::new();
        self.employee.check(object, &mut errors);
        finish(errors)
    }

    /// Validates a partial metrics update body.
    ///
    /// # Errors
    ///
    /// Returns every field failure.
    pub fn validate_metrics_patch(&self, body: &Value) -> Result<(), Vec<FieldError>> {
        let object = require_object(body)?;
        let mut errors = Vec::new();
        self.metrics.check(object, &mut errors);
        finish(errors)
    }

    /// Validates a simulate-loading body.
    ///
    /// # Errors
    ///
    /// Returns every field failure.
    pub fn validate_simulation(&self, body: &Value) -> Result<(), Vec<FieldError>> {
        let object = require_object(body)?;
        let mut errors = Vec::new();
        self.simulation.check(object, &mut errors);
        finish(errors)
    }
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Employee property schemas.
fn employee_property_schemas() -> Vec<(&'static str, Value)> {
    let text = json!({"type": "string"});
    let nullable_text = json!({"type": ["string", "null"]});
    vec![
        ("name", text.clone()),
        ("title", text.clone()),
        ("department", text.clone()),
        ("email", text),
        ("status", json!({"type": "string", "enum": ["active", "remote", "offline"]})),
        ("skills", json!({"type": "array", "items": {"type": "string"}})),
        ("avatar", nullable_text.clone()),
        ("bio", nullable_text.clone()),
        ("location", nullable_text),
        ("apiSources", json!({"type": "object", "additionalProperties": {"type": "string"}})),
    ]
}

/// Metrics property schemas.
fn metrics_property_schemas() -> Vec<(&'static str, Value)> {
    let text = json!({"type": "string"});
    vec![
        ("tti", text.clone()),
        ("previousTti", text.clone()),
        ("improvement", text.clone()),
        ("apiSourcesCount", text.clone()),
        ("searchSpeedMultiplier", text),
        ("wcagCompliant", json!({"type": "boolean"})),
    ]
}

/// Simulation request property schemas.
fn simulation_property_schemas() -> Vec<(&'static str, Value)> {
    vec![("sources", json!({"type": "array", "items": {"type": "string"}}))]
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Compiles a JSON schema for validation.
fn compile_schema(field: &'static str, schema: &Value) -> Result<Validator, ValidationError> {
    jsonschema::options().with_draft(Draft::Draft202012).build(schema).map_err(|err| {
        ValidationError::Schema {
            field,
            message: err.to_string(),
        }
    })
}

/// Returns the body as an object or a root-level failure.
fn require_object(body: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    body.as_object().ok_or_else(|| vec![FieldError::new("", "Expected a JSON object")])
}

/// Converts collected failures into a result.
fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
