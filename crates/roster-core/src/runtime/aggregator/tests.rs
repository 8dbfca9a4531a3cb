// crates/roster-core/src/runtime/aggregator/tests.rs
// ============================================================================
// Module: Aggregator Unit Tests
// Description: Ordering, partial failure, and rate math for aggregation.
// Purpose: Pin fan-out semantics under a paused Tokio clock.
// Dependencies: roster-core, tokio
// ============================================================================

//! ## Overview
//! Uses scripted entropy so each source's delay and outcome are fixed. Each
//! source consumes two samples: delay first, then outcome.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    reason = "Test-only panic-based assertions."
)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::Aggregator;
use super::SourceOutcome;
use super::SourceStatus;
use super::success_rate;
use crate::runtime::entropy::ScriptedEntropy;
use crate::runtime::simulator::SourceCatalog;
use crate::runtime::simulator::SourceSimulator;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn aggregator(samples: Vec<f64>) -> Aggregator {
    let entropy = Arc::new(ScriptedEntropy::new(samples));
    Aggregator::new(SourceSimulator::new(SourceCatalog::builtin(), entropy))
}

fn sources(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

// ============================================================================
// SECTION: Behavior
// ============================================================================

#[tokio::test(start_paused = true)]
async fn results_keep_input_order_when_a_middle_source_is_slowest() {
    // twitter 200ms ok, imdb 1500ms ok, wikipedia 300ms ok
    let aggregator = aggregator(vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    let report = aggregator.aggregate(&sources(&["twitter", "imdb", "wikipedia"])).await;
    let order: Vec<&str> = report.results.iter().map(|outcome| outcome.source.as_str()).collect();
    assert_eq!(order, vec!["twitter", "imdb", "wikipedia"]);
    assert_eq!(report.success_rate, 1.0);
}

#[tokio::test(start_paused = true)]
async fn sources_run_concurrently() {
    let aggregator = aggregator(vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    let report = aggregator.aggregate(&sources(&["twitter", "imdb", "wikipedia"])).await;
    assert!(report.elapsed >= Duration::from_millis(1500));
    assert!(report.elapsed < Duration::from_millis(2000));
    assert_eq!(report.total_time_label(), "1.5s");
}

#[tokio::test(start_paused = true)]
async fn partial_failure_is_reported_not_raised() {
    let aggregator = aggregator(vec![0.0, 0.0, 0.0, 0.99, 0.0, 0.0]);
    let report = aggregator.aggregate(&sources(&["twitter", "imdb", "wikipedia"])).await;
    let statuses: Vec<SourceStatus> = report.results.iter().map(|outcome| outcome.status).collect();
    assert_eq!(statuses, vec![SourceStatus::Success, SourceStatus::Error, SourceStatus::Success]);
    assert!((report.success_rate - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.successes(), 2);
    assert_eq!(report.failures(), 1);

    let failed = &report.results[1];
    assert!(failed.data.is_none());
    assert_eq!(failed.error.as_deref(), Some("imdb API temporarily unavailable"));
    let succeeded = &report.results[0];
    assert!(succeeded.error.is_none());
    assert_eq!(succeeded.data.as_ref().map(|data| data.load_time.as_str()), Some("200ms"));
}

#[tokio::test(start_paused = true)]
async fn empty_request_has_zero_rate() {
    let aggregator = aggregator(Vec::new());
    let report = aggregator.aggregate(&[]).await;
    assert!(report.results.is_empty());
    assert_eq!(report.success_rate, 0.0);
}

#[tokio::test(start_paused = true)]
async fn unknown_and_repeated_sources_are_each_reported() {
    let aggregator = aggregator(vec![0.0, 0.0, 0.0, 0.0]);
    let report = aggregator.aggregate(&sources(&["myspace", "myspace"])).await;
    assert_eq!(report.results.len(), 2);
    for outcome in &report.results {
        assert_eq!(outcome.source, "myspace");
        let data = outcome.data.as_ref().expect("payload");
        assert_eq!(data.profile, "Mock myspace profile data");
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

#[test]
fn unsettled_task_is_an_error_outcome() {
    let outcome = SourceOutcome::unsettled("imdb".to_string());
    assert_eq!(outcome.status, SourceStatus::Error);
    assert_eq!(outcome.error.as_deref(), Some("task failed to settle"));
    assert!(outcome.data.is_none());
}

#[test]
fn outcome_serializes_absent_fields_as_null() {
    let outcome = SourceOutcome::unsettled("imdb".to_string());
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        value,
        json!({"source": "imdb", "status": "error", "data": null, "error": "task failed to settle"})
    );
}

#[test]
fn rate_is_successes_over_total() {
    assert_eq!(success_rate(0, 0), 0.0);
    assert_eq!(success_rate(3, 3), 1.0);
    assert_eq!(success_rate(1, 4), 0.25);
}
