// crates/roster-server/src/audit.rs
// ============================================================================
// Module: Audit Logging
// Description: Structured audit events for request handling and aggregation.
// Purpose: Emit JSON-line audit records without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are plain serializable structs written one JSON object per
//! line. Sinks are swappable: stderr for interactive runs, an append-only
//! file for deployments, and a no-op sink when auditing is disabled.
//! Events never include request or response bodies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use roster_core::AggregateReport;
use serde::Serialize;

use crate::telemetry::ApiRoute;
use crate::telemetry::RequestOutcome;

// ============================================================================
// SECTION: Types
// ============================================================================

/// HTTP request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Route classification.
    pub route: ApiRoute,
    /// Response status code.
    pub status: u16,
    /// Handling latency in milliseconds.
    pub latency_ms: u128,
    /// Outcome classification.
    pub outcome: RequestOutcome,
}

/// Aggregation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Requested sources in input order.
    pub sources: Vec<String>,
    /// Number of successful sources.
    pub successes: usize,
    /// Number of failed sources.
    pub failures: usize,
    /// Fan-out wall time in milliseconds.
    pub elapsed_ms: u128,
}

impl RequestAuditEvent {
    /// Creates a request audit event with the current timestamp.
    #[must_use]
    pub fn new(method: String, route: ApiRoute, status: u16, latency: Duration) -> Self {
        Self {
            event: "http_request",
            timestamp_ms: now_ms(),
            method,
            route,
            status,
            latency_ms: latency.as_millis(),
            outcome: RequestOutcome::from_status(
                axum::http::StatusCode::from_u16(status)
                    .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
            ),
        }
    }
}

impl AggregationAuditEvent {
    /// Summarizes an aggregation report.
    #[must_use]
    pub fn from_report(report: &AggregateReport) -> Self {
        Self {
            event: "aggregation",
            timestamp_ms: now_ms(),
            sources: report.results.iter().map(|outcome| outcome.source.clone()).collect(),
            successes: report.successes(),
            failures: report.failures(),
            elapsed_ms: report.elapsed.as_millis(),
        }
    }
}

/// Returns milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for server events.
pub trait AuditSink: Send + Sync {
    /// Record a request audit event.
    fn record_request(&self, event: &RequestAuditEvent);

    /// Record an aggregation audit event.
    fn record_aggregation(&self, _event: &AggregationAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        write_line(&mut io::stderr(), event);
    }

    fn record_aggregation(&self, event: &AggregationAuditEvent) {
        write_line(&mut io::stderr(), event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Writes one event while holding the file lock.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(mut file) = self.file.lock() {
            write_line(&mut *file, event);
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        self.append(event);
    }

    fn record_aggregation(&self, event: &AggregationAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_request(&self, _event: &RequestAuditEvent) {}

    fn record_aggregation(&self, _event: &AggregationAuditEvent) {}
}

/// Serializes `event` as one JSON line; failures are dropped.
fn write_line<W: Write, T: Serialize>(writer: &mut W, event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(writer, "{payload}");
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
