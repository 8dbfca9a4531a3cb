// crates/roster-server/src/error.rs
// ============================================================================
// Module: API Errors
// Description: Handler error type and its HTTP mapping.
// Purpose: Turn store, metrics, and validation failures into JSON responses.
// Dependencies: axum, serde, thiserror
// ============================================================================

//! ## Overview
//! Every handler returns `Result<_, ApiError>`. The error body is always
//! `{message}`; validation failures add `errors: [{path, message}]`.
//! Internal failures carry a route-specific message and never expose the
//! underlying cause.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Top-level property name; empty for the body itself.
    pub path: String,
    /// Human-readable failure description.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource does not exist.
    #[error("{0}")]
    NotFound(&'static str),
    /// Body failed schema or uniqueness validation.
    #[error("{message}")]
    Validation {
        /// Route-specific summary.
        message: &'static str,
        /// Individual failures.
        errors: Vec<FieldError>,
    },
    /// Request was malformed in a way not tied to one field.
    #[error("{0}")]
    Invalid(String),
    /// Body exceeded the configured size limit.
    #[error("request body too large")]
    PayloadTooLarge,
    /// Unexpected server-side failure.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation {
                ..
            }
            | Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Summary message.
    message: String,
    /// Field failures, validation only.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let errors = match self {
            Self::Validation {
                errors, ..
            } => Some(errors),
            _ => None,
        };
        (
            status,
            Json(ErrorBody {
                message,
                errors,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::ApiError;
    use super::FieldError;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ApiError::NotFound("Employee not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Invalid("bad".to_string()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            ApiError::Internal("Failed to fetch employees").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_response_is_bad_request() {
        let error = ApiError::Validation {
            message: "Invalid employee data",
            errors: vec![FieldError::new("email", "Email already in use")],
        };
        assert_eq!(error.to_string(), "Invalid employee data");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
