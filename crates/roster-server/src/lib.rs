// crates/roster-server/src/lib.rs
// ============================================================================
// Module: Roster Server Library
// Description: HTTP API for the employee directory and aggregation demo.
// Purpose: Expose the store, metrics, and aggregator over JSON routes.
// Dependencies: roster-core, roster-config, axum, jsonschema, tokio
// ============================================================================

//! ## Overview
//! `roster-server` wires the core components into an axum router. Handlers
//! validate request bodies against JSON schemas, map core errors onto HTTP
//! statuses, and every request passes through one observation middleware
//! that records telemetry and a JSON-line audit event.
//!
//! Security posture: request bodies are untrusted and size-limited; there is
//! no authentication.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AggregationAuditEvent;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::StderrAuditSink;
pub use error::ApiError;
pub use error::FieldError;
pub use routes::build_router;
pub use server::RosterServer;
pub use server::ServerError;
pub use state::AppState;
pub use state::HandlerSettings;
pub use state::StateParts;
pub use telemetry::ApiRoute;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestMetricEvent;
pub use telemetry::RequestMetrics;
pub use telemetry::RequestOutcome;
pub use validation::PayloadValidator;
