// crates/roster-server/src/telemetry.rs
// ============================================================================
// Module: Request Telemetry
// Description: Observability hooks for HTTP request handling.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: axum, serde
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for request counters and
//! latency histograms. Deployments can plug in a real exporter by
//! implementing [`RequestMetrics`]; the server defaults to [`NoopMetrics`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use axum::http::Method;
use axum::http::StatusCode;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for request histograms.
pub const LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// API route classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiRoute {
    /// `GET /api/employees`.
    ListEmployees,
    /// `GET /api/employees/{id}`.
    GetEmployee,
    /// `POST /api/employees`.
    CreateEmployee,
    /// `PATCH /api/employees/{id}`.
    UpdateEmployee,
    /// `DELETE /api/employees/{id}`.
    DeleteEmployee,
    /// `GET /api/metrics`.
    GetMetrics,
    /// `PATCH /api/metrics`.
    UpdateMetrics,
    /// `POST /api/simulate-loading`.
    SimulateLoading,
    /// `POST /api/simulate-error`.
    SimulateError,
    /// `GET /health`.
    Health,
    /// Unmatched path or method.
    Other,
}

impl ApiRoute {
    /// Classifies a request by method and matched route template.
    #[must_use]
    pub fn classify(method: &Method, matched_path: Option<&str>) -> Self {
        let Some(path) = matched_path else {
            return Self::Other;
        };
        match (method.as_str(), path) {
            ("GET", "/api/employees") => Self::ListEmployees,
            ("POST", "/api/employees") => Self::CreateEmployee,
            ("GET", "/api/employees/{id}") => Self::GetEmployee,
            ("PATCH", "/api/employees/{id}") => Self::UpdateEmployee,
            ("DELETE", "/api/employees/{id}") => Self::DeleteEmployee,
            ("GET", "/api/metrics") => Self::GetMetrics,
            ("PATCH", "/api/metrics") => Self::UpdateMetrics,
            ("POST", "/api/simulate-loading") => Self::SimulateLoading,
            ("POST", "/api/simulate-error") => Self::SimulateError,
            ("GET", "/health") => Self::Health,
            _ => Self::Other,
        }
    }

    /// Returns a stable label for the route.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListEmployees => "list_employees",
            Self::GetEmployee => "get_employee",
            Self::CreateEmployee => "create_employee",
            Self::UpdateEmployee => "update_employee",
            Self::DeleteEmployee => "delete_employee",
            Self::GetMetrics => "get_metrics",
            Self::UpdateMetrics => "update_metrics",
            Self::SimulateLoading => "simulate_loading",
            Self::SimulateError => "simulate_error",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

/// Request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// 1xx-3xx response.
    Ok,
    /// 4xx response.
    ClientError,
    /// 5xx response.
    ServerError,
}

impl RequestOutcome {
    /// Classifies a response status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Ok
        }
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

/// Request metric event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetricEvent {
    /// Route classification.
    pub route: ApiRoute,
    /// HTTP method.
    pub method: String,
    /// Response status code.
    pub status: u16,
    /// Outcome classification.
    pub outcome: RequestOutcome,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for requests and latencies.
pub trait RequestMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: RequestMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: RequestMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl RequestMetrics for NoopMetrics {
    fn record_request(&self, _event: RequestMetricEvent) {}

    fn record_latency(&self, _event: RequestMetricEvent, _latency: Duration) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
