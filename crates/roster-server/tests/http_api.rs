// crates/roster-server/tests/http_api.rs
// ============================================================================
// Module: HTTP API Integration Tests
// Description: End-to-end route behavior over a loopback listener.
// Purpose: Pin status codes, bodies, and headers of every route.
// Dependencies: roster-server, roster-core, reqwest, tokio
// ============================================================================

//! ## Overview
//! Each test starts its own server on an ephemeral port with scripted entropy
//! and the sample employees loaded. Artificial delays are zero except in the
//! tests that time them.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    reason = "Test-only panic-based assertions."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::StatusCode;
use roster_core::Aggregator;
use roster_core::EmployeeStore;
use roster_core::MetricsHolder;
use roster_core::ScriptedEntropy;
use roster_core::SourceCatalog;
use roster_core::SourceSimulator;
use roster_core::SystemClock;
use roster_server::AggregationAuditEvent;
use roster_server::ApiRoute;
use roster_server::AppState;
use roster_server::AuditSink;
use roster_server::HandlerSettings;
use roster_server::NoopAuditSink;
use roster_server::NoopMetrics;
use roster_server::RequestAuditEvent;
use roster_server::RosterServer;
use roster_server::StateParts;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Audit sink that keeps every event in memory.
#[derive(Default)]
struct RecordingSink {
    requests: Mutex<Vec<RequestAuditEvent>>,
    aggregations: Mutex<Vec<AggregationAuditEvent>>,
}

impl AuditSink for RecordingSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        self.requests.lock().unwrap().push(event.clone());
    }

    fn record_aggregation(&self, event: &AggregationAuditEvent) {
        self.aggregations.lock().unwrap().push(event.clone());
    }
}

struct TestServer {
    base: String,
    client: Client,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

const NO_DELAYS: HandlerSettings = HandlerSettings {
    list_delay: Duration::ZERO,
    error_delay: Duration::ZERO,
    max_sources: 4,
};

async fn spawn_server_with(
    samples: Vec<f64>,
    audit: Arc<dyn AuditSink>,
    max_body_bytes: usize,
) -> TestServer {
    spawn_server_with_settings(samples, audit, max_body_bytes, NO_DELAYS).await
}

async fn spawn_server_with_settings(
    samples: Vec<f64>,
    audit: Arc<dyn AuditSink>,
    max_body_bytes: usize,
    settings: HandlerSettings,
) -> TestServer {
    let clock = Arc::new(SystemClock);
    let store = EmployeeStore::with_sample_data(clock.clone()).unwrap();
    let simulator =
        SourceSimulator::new(SourceCatalog::builtin(), Arc::new(ScriptedEntropy::new(samples)));
    let state = AppState::new(StateParts {
        store: Arc::new(store),
        metrics: Arc::new(MetricsHolder::new(clock)),
        aggregator: Arc::new(Aggregator::new(simulator)),
        audit,
        telemetry: Arc::new(NoopMetrics),
        settings,
    })
    .unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = RosterServer::from_state(addr, state, max_body_bytes);
    tokio::spawn(server.serve_listener(listener));
    TestServer {
        base: format!("http://{addr}"),
        client: Client::new(),
    }
}

async fn spawn_server() -> TestServer {
    spawn_server_with(Vec::new(), Arc::new(NoopAuditSink), 1024 * 1024).await
}

fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "title": "Engineer",
        "department": "Engineering",
        "email": "jane@x.com"
    })
}

async fn names(server: &TestServer, query: &str) -> Vec<String> {
    let response = server.client.get(server.url(&format!("/api/employees{query}"))).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = response.json().await.unwrap();
    body.iter().map(|employee| employee["name"].as_str().unwrap().to_string()).collect()
}

// ============================================================================
// SECTION: Employees
// ============================================================================

#[tokio::test]
async fn lists_sample_employees_with_filters() {
    let server = spawn_server().await;
    assert_eq!(names(&server, "").await.len(), 6);
    assert_eq!(
        names(&server, "?search=engineering").await,
        vec!["Sarah Chen", "David Kim", "Lisa Zhang", "Alex Thompson"]
    );
    assert_eq!(names(&server, "?department=design&status=remote").await, vec!["Marcus Rodriguez"]);
    assert_eq!(names(&server, "?search=&department=&status=").await.len(), 6);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let server = spawn_server().await;
    let response = server.client.post(server.url("/api/employees")).json(&jane()).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["status"], "active");
    assert_eq!(created["skills"], json!([]));
    assert_eq!(created["apiSources"], json!({}));
    assert_eq!(created["avatar"], Value::Null);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let fetched: Value = server
        .client
        .get(server.url(&format!("/api/employees/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_rejects_invalid_bodies_with_field_errors() {
    let server = spawn_server().await;
    let response = server
        .client
        .post(server.url("/api/employees"))
        .json(&json!({"name": "Jane Doe", "status": "busy"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid employee data");
    let paths: Vec<&str> =
        body["errors"].as_array().unwrap().iter().map(|error| error["path"].as_str().unwrap()).collect();
    for field in ["title", "department", "email", "status"] {
        assert!(paths.contains(&field), "missing {field} in {paths:?}");
    }
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let server = spawn_server().await;
    let response = server
        .client
        .post(server.url("/api/employees"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["path"], "");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let server = spawn_server().await;
    let mut body = jane();
    body["email"] = json!("sarah.chen@company.com");
    let response = server.client.post(server.url("/api/employees")).json(&body).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"], json!([{"path": "email", "message": "Email already in use"}]));
    assert_eq!(names(&server, "").await.len(), 6);
}

#[tokio::test]
async fn patch_merges_and_missing_ids_are_not_found() {
    let server = spawn_server().await;
    let created: Value = server
        .client
        .post(server.url("/api/employees"))
        .json(&jane())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let url = server.url(&format!("/api/employees/{}", created["id"].as_str().unwrap()));

    let response =
        server.client.patch(&url).json(&json!({"title": "Staff Engineer"})).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["title"], "Staff Engineer");
    assert_eq!(updated["name"], "Jane Doe");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = server
        .client
        .patch(server.url("/api/employees/missing"))
        .json(&json!({"title": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Employee not found"}));
    assert_eq!(names(&server, "").await.len(), 7);
}

#[tokio::test]
async fn delete_is_no_content_then_not_found() {
    let server = spawn_server().await;
    let created: Value = server
        .client
        .post(server.url("/api/employees"))
        .json(&jane())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let url = server.url(&format!("/api/employees/{}", created["id"].as_str().unwrap()));
    let first = server.client.delete(&url).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(first.bytes().await.unwrap().is_empty());
    assert_eq!(server.client.delete(&url).send().await.unwrap().status(), StatusCode::NOT_FOUND);
    assert_eq!(server.client.get(&url).send().await.unwrap().status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

#[tokio::test]
async fn metrics_can_be_read_and_patched() {
    let server = spawn_server().await;
    let initial: Value =
        server.client.get(server.url("/api/metrics")).send().await.unwrap().json().await.unwrap();
    assert_eq!(initial["tti"], "1.2s");
    assert_eq!(initial["previousTti"], "2.1s");
    assert_eq!(initial["wcagCompliant"], true);

    let response = server
        .client
        .patch(server.url("/api/metrics"))
        .json(&json!({"improvement": "50%"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["improvement"], "50%");
    assert_eq!(updated["tti"], "1.2s");
    assert_eq!(updated["id"], initial["id"]);

    let rejected = server
        .client
        .patch(server.url("/api/metrics"))
        .json(&json!({"wcagCompliant": "yes"}))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// SECTION: Simulation
// ============================================================================

#[tokio::test]
async fn simulate_loading_reports_partial_failure_in_order() {
    let audit = Arc::new(RecordingSink::default());
    let server =
        spawn_server_with(vec![0.0, 0.0, 0.0, 0.99, 0.0, 0.0], audit.clone(), 1024 * 1024).await;
    let response = server.client.post(server.url("/api/simulate-loading")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();

    let data = body["aggregatedData"].as_array().unwrap();
    let sources: Vec<&str> = data.iter().map(|item| item["source"].as_str().unwrap()).collect();
    assert_eq!(sources, vec!["twitter", "imdb", "wikipedia"]);
    assert_eq!(data[0]["status"], "success");
    assert_eq!(data[0]["data"]["profile"], "Mock twitter profile data");
    assert_eq!(data[0]["error"], Value::Null);
    assert_eq!(data[1]["status"], "error");
    assert_eq!(data[1]["data"], Value::Null);
    assert_eq!(data[1]["error"], "imdb API temporarily unavailable");
    let rate = body["successRate"].as_f64().unwrap();
    assert!((rate - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(body["improvement"], "44%");
    assert!(body["totalTime"].as_str().unwrap().ends_with('s'));

    let aggregations = audit.aggregations.lock().unwrap();
    assert_eq!(aggregations.len(), 1);
    assert_eq!(aggregations[0].successes, 2);
    assert_eq!(aggregations[0].failures, 1);
}

#[tokio::test]
async fn simulate_loading_validates_sources() {
    let server = spawn_server().await;
    let empty: Value = server
        .client
        .post(server.url("/api/simulate-loading"))
        .json(&json!({"sources": []}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty["aggregatedData"], json!([]));
    assert_eq!(empty["successRate"].as_f64(), Some(0.0));

    let too_many = server
        .client
        .post(server.url("/api/simulate-loading"))
        .json(&json!({"sources": ["a", "b", "c", "d", "e"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(too_many.status(), StatusCode::BAD_REQUEST);

    let wrong_type = server
        .client
        .post(server.url("/api/simulate-loading"))
        .json(&json!({"sources": "imdb"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn simulate_error_rate_limit_sets_retry_after() {
    let server = spawn_server().await;
    let response = server
        .client
        .post(server.url("/api/simulate-error"))
        .json(&json!({"errorType": "rate_limit"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get("retry-after").unwrap(), "60");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["retryAfter"], 60);
    assert_eq!(body["message"], "Rate limit exceeded - Please try again in a few minutes");
}

#[tokio::test]
async fn simulate_error_waits_for_the_configured_delay() {
    let settings = HandlerSettings {
        error_delay: Duration::from_millis(1000),
        ..NO_DELAYS
    };
    let server =
        spawn_server_with_settings(Vec::new(), Arc::new(NoopAuditSink), 1024 * 1024, settings).await;
    let started = Instant::now();
    let response = server
        .client
        .post(server.url("/api/simulate-error"))
        .json(&json!({"errorType": "rate_limit"}))
        .send()
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get("retry-after").unwrap(), "60");
}

#[tokio::test]
async fn listing_waits_for_the_configured_delay() {
    let settings = HandlerSettings {
        list_delay: Duration::from_millis(300),
        ..NO_DELAYS
    };
    let server =
        spawn_server_with_settings(Vec::new(), Arc::new(NoopAuditSink), 1024 * 1024, settings).await;
    let started = Instant::now();
    let response = server.client.get(server.url("/api/employees")).send().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(response.status(), StatusCode::OK);

    let started = Instant::now();
    let response = server.client.get(server.url("/api/metrics")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() < Duration::from_millis(300));
}

#[tokio::test]
async fn simulate_error_defaults_to_network_and_handles_unknown() {
    let server = spawn_server().await;
    let network = server.client.post(server.url("/api/simulate-error")).send().await.unwrap();
    assert_eq!(network.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = network.json().await.unwrap();
    assert_eq!(body["details"], json!({"twitter": "success", "imdb": "timeout", "wikipedia": "error"}));

    let unknown = server
        .client
        .post(server.url("/api/simulate-error"))
        .json(&json!({"errorType": "meteor"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = unknown.json().await.unwrap();
    assert_eq!(body, json!({"message": "Unknown error occurred"}));
}

// ============================================================================
// SECTION: Transport
// ============================================================================

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let server = spawn_server_with(Vec::new(), Arc::new(NoopAuditSink), 256).await;
    let mut body = jane();
    body["bio"] = json!("x".repeat(4096));
    let response = server.client.post(server.url("/api/employees")).json(&body).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_and_unknown_paths() {
    let server = spawn_server().await;
    let health: Value =
        server.client.get(server.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health, json!({"status": "ok"}));
    let missing = server.client.get(server.url("/api/nothing")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn every_request_is_audited_with_its_route() {
    let audit = Arc::new(RecordingSink::default());
    let server = spawn_server_with(Vec::new(), audit.clone(), 1024 * 1024).await;
    server.client.get(server.url("/api/metrics")).send().await.unwrap();
    server.client.get(server.url("/api/employees/missing")).send().await.unwrap();
    server.client.get(server.url("/nowhere")).send().await.unwrap();

    let requests = audit.requests.lock().unwrap();
    let seen: Vec<(ApiRoute, u16)> = requests.iter().map(|event| (event.route, event.status)).collect();
    assert_eq!(
        seen,
        vec![(ApiRoute::GetMetrics, 200), (ApiRoute::GetEmployee, 404), (ApiRoute::Other, 404)]
    );
    assert!(requests.iter().all(|event| event.event == "http_request"));
}
