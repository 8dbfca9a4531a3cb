// crates/roster-server/src/handlers.rs
// ============================================================================
// Module: Request Handlers
// Description: Employee CRUD, metrics, and simulation route handlers.
// Purpose: Translate HTTP requests into core operations and JSON responses.
// Dependencies: axum, roster-core, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! Bodies are taken as raw bytes so size-limit, malformed-JSON, and schema
//! failures all map onto the JSON error format. An empty body is treated as
//! `{}`. Simulated upstream failures in an aggregation are data in a 200
//! response; only `simulate-error` produces deliberate error statuses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::http::header::RETRY_AFTER;
use axum::response::IntoResponse;
use axum::response::Response;
use roster_core::ApiMetrics;
use roster_core::ApiMetricsPatch;
use roster_core::DEFAULT_SOURCES;
use roster_core::Employee;
use roster_core::EmployeeFilter;
use roster_core::EmployeePatch;
use roster_core::NewEmployee;
use roster_core::SourceOutcome;
use roster_core::StoreError;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::audit::AggregationAuditEvent;
use crate::error::ApiError;
use crate::error::FieldError;
use crate::state::AppState;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Validation summary for employee bodies.
const INVALID_EMPLOYEE: &str = "Invalid employee data";
/// Validation summary for metrics bodies.
const INVALID_METRICS: &str = "Invalid metrics data";
/// Validation summary for simulation bodies.
const INVALID_SIMULATION: &str = "Invalid simulation request";
/// Not-found message for employee routes.
const EMPLOYEE_NOT_FOUND: &str = "Employee not found";
/// Retry hint for the simulated rate limit, in seconds.
const RETRY_AFTER_SECS: u64 = 60;

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Body of `POST /api/simulate-loading`.
#[derive(Debug, Deserialize)]
struct SimulationRequest {
    /// Sources to query; the default trio when absent.
    #[serde(default)]
    sources: Option<Vec<String>>,
}

/// Response of `POST /api/simulate-loading`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// Per-source outcomes in request order.
    pub aggregated_data: Vec<SourceOutcome>,
    /// Measured fan-out wall time, e.g. `"0.8s"`.
    pub total_time: String,
    /// Improvement label from the metrics snapshot.
    pub improvement: String,
    /// Fraction of successful sources.
    pub success_rate: f64,
}

/// Failure kinds produced by `POST /api/simulate-error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulatedFailure {
    /// Upstream network outage.
    Network,
    /// Upstream rate limiting.
    RateLimit,
    /// Anything else.
    Unknown,
}

impl SimulatedFailure {
    /// Reads `errorType` from the body; absent means `network`.
    fn from_body(body: &Value) -> Self {
        match body.get("errorType") {
            None => Self::Network,
            Some(Value::String(kind)) if kind == "network" => Self::Network,
            Some(Value::String(kind)) if kind == "rate_limit" => Self::RateLimit,
            Some(_) => Self::Unknown,
        }
    }

    /// Builds the deliberate error response.
    fn response(self) -> Response {
        match self {
            Self::Network => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "message": "Network timeout - One or more API sources are unavailable",
                    "details": {
                        "twitter": "success",
                        "imdb": "timeout",
                        "wikipedia": "error"
                    }
                })),
            )
                .into_response(),
            Self::RateLimit => (
                StatusCode::TOO_MANY_REQUESTS,
                [(RETRY_AFTER, RETRY_AFTER_SECS.to_string())],
                Json(json!({
                    "message": "Rate limit exceeded - Please try again in a few minutes",
                    "retryAfter": RETRY_AFTER_SECS
                })),
            )
                .into_response(),
            Self::Unknown => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Unknown error occurred"})),
            )
                .into_response(),
        }
    }
}

// ============================================================================
// SECTION: Employees
// ============================================================================

/// `GET /api/employees`: filtered listing after the configured delay.
pub async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<EmployeeFilter>, QueryRejection>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let Query(filter) = query.map_err(|rejection| ApiError::Invalid(rejection.body_text()))?;
    tokio::time::sleep(state.settings.list_delay).await;
    state.store.list(&filter).map(Json).map_err(|_| ApiError::Internal("Failed to fetch employees"))
}

/// `GET /api/employees/{id}`.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    match state.store.get(&id) {
        Ok(Some(employee)) => Ok(Json(employee)),
        Ok(None) => Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND)),
        Err(_) => Err(ApiError::Internal("Failed to fetch employee")),
    }
}

/// `POST /api/employees`.
pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let value = parse_body(body, INVALID_EMPLOYEE)?;
    state.validator.validate_new_employee(&value).map_err(|errors| ApiError::Validation {
        message: INVALID_EMPLOYEE,
        errors,
    })?;
    let new: NewEmployee = decode(value, INVALID_EMPLOYEE)?;
    match state.store.create(new) {
        Ok(employee) => Ok((StatusCode::CREATED, Json(employee))),
        Err(StoreError::DuplicateEmail(_)) => Err(duplicate_email()),
        Err(StoreError::Poisoned) => Err(ApiError::Internal("Failed to create employee")),
    }
}

/// `PATCH /api/employees/{id}`.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Employee>, ApiError> {
    let value = parse_body(body, INVALID_EMPLOYEE)?;
    state.validator.validate_employee_patch(&value).map_err(|errors| ApiError::Validation {
        message: INVALID_EMPLOYEE,
        errors,
    })?;
    let patch: EmployeePatch = decode(value, INVALID_EMPLOYEE)?;
    match state.store.update(&id, patch) {
        Ok(Some(employee)) => Ok(Json(employee)),
        Ok(None) => Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND)),
        Err(StoreError::DuplicateEmail(_)) => Err(duplicate_email()),
        Err(StoreError::Poisoned) => Err(ApiError::Internal("Failed to update employee")),
    }
}

/// `DELETE /api/employees/{id}`.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete(&id) {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND)),
        Err(_) => Err(ApiError::Internal("Failed to delete employee")),
    }
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// `GET /api/metrics`.
pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<ApiMetrics>, ApiError> {
    state.metrics.get().map(Json).map_err(|_| ApiError::Internal("Failed to fetch metrics"))
}

/// `PATCH /api/metrics`.
pub async fn update_metrics(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiMetrics>, ApiError> {
    let value = parse_body(body, INVALID_METRICS)?;
    state.validator.validate_metrics_patch(&value).map_err(|errors| ApiError::Validation {
        message: INVALID_METRICS,
        errors,
    })?;
    let patch: ApiMetricsPatch = decode(value, INVALID_METRICS)?;
    state.metrics.update(patch).map(Json).map_err(|_| ApiError::Internal("Failed to update metrics"))
}

// ============================================================================
// SECTION: Simulation
// ============================================================================

/// `POST /api/simulate-loading`: concurrent fan-out over simulated sources.
pub async fn simulate_loading(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let value = parse_body(body, INVALID_SIMULATION)?;
    state.validator.validate_simulation(&value).map_err(|errors| ApiError::Validation {
        message: INVALID_SIMULATION,
        errors,
    })?;
    let request: SimulationRequest = decode(value, INVALID_SIMULATION)?;
    let sources = request
        .sources
        .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(ToString::to_string).collect());
    let max_sources = state.settings.max_sources;
    if sources.len() > max_sources {
        return Err(ApiError::Validation {
            message: INVALID_SIMULATION,
            errors: vec![FieldError::new(
                "sources",
                format!("At most {max_sources} sources per request"),
            )],
        });
    }

    let report = state.aggregator.aggregate(&sources).await;
    state.audit.record_aggregation(&AggregationAuditEvent::from_report(&report));
    let improvement = state
        .metrics
        .get()
        .map_err(|_| ApiError::Internal("Failed to simulate API aggregation"))?
        .improvement;
    let total_time = report.total_time_label();
    Ok(Json(SimulationResponse {
        aggregated_data: report.results,
        total_time,
        improvement,
        success_rate: report.success_rate,
    }))
}

/// `POST /api/simulate-error`: deliberate failure after the configured delay.
pub async fn simulate_error(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let value = parse_body(body, "Invalid request body")?;
    let failure = SimulatedFailure::from_body(&value);
    tokio::time::sleep(state.settings.error_delay).await;
    Ok(failure.response())
}

// ============================================================================
// SECTION: Misc
// ============================================================================

/// `GET /health`.
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found")
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a JSON body, mapping limit and syntax failures to API errors.
fn parse_body(body: Result<Bytes, BytesRejection>, message: &'static str) -> Result<Value, ApiError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Invalid(rejection.body_text())
        }
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Validation {
        message,
        errors: vec![FieldError::new("", format!("Malformed JSON: {err}"))],
    })
}

/// Deserializes a schema-checked body into its typed form.
fn decode<T: DeserializeOwned>(value: Value, message: &'static str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Validation {
        message,
        errors: vec![FieldError::new("", err.to_string())],
    })
}

/// Validation error for an email owned by another employee.
fn duplicate_email() -> ApiError {
    ApiError::Validation {
        message: INVALID_EMPLOYEE,
        errors: vec![FieldError::new("email", "Email already in use")],
    }
}
