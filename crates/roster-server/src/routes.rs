// crates/roster-server/src/routes.rs
// ============================================================================
// Module: HTTP Routes
// Description: Router assembly and the request observation middleware.
// Purpose: Bind handlers to paths and record telemetry for every request.
// Dependencies: axum
// ============================================================================

//! ## Overview
//! All API paths live under `/api`; `/health` sits outside it. Unmatched
//! paths get a JSON 404. The body limit applies to every route, and the
//! observation layer sees every response including fallbacks and rejections.

use std::time::Instant;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;

use crate::audit::RequestAuditEvent;
use crate::handlers;
use crate::state::AppState;
use crate::telemetry::ApiRoute;
use crate::telemetry::RequestMetricEvent;
use crate::telemetry::RequestOutcome;

/// Builds the application router over `state`.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/employees", get(handlers::list_employees).post(handlers::create_employee))
        .route(
            "/api/employees/{id}",
            get(handlers::get_employee)
                .patch(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route("/api/metrics", get(handlers::get_metrics).patch(handlers::update_metrics))
        .route("/api/simulate-loading", post(handlers::simulate_loading))
        .route("/api/simulate-error", post(handlers::simulate_error))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn_with_state(state.clone(), observe))
        .with_state(state)
}

/// Records one metric event and one audit event per request.
async fn observe(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = ApiRoute::classify(
        &method,
        request.extensions().get::<MatchedPath>().map(MatchedPath::as_str),
    );
    let response = next.run(request).await;
    let latency = started.elapsed();
    let status = response.status();

    let event = RequestMetricEvent {
        route,
        method: method.as_str().to_string(),
        status: status.as_u16(),
        outcome: RequestOutcome::from_status(status),
    };
    state.telemetry.record_request(event.clone());
    state.telemetry.record_latency(event, latency);
    state.audit.record_request(&RequestAuditEvent::new(
        method.as_str().to_string(),
        route,
        status.as_u16(),
        latency,
    ));
    response
}
