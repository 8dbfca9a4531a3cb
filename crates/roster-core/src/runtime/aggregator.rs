// crates/roster-core/src/runtime/aggregator.rs
// ============================================================================
// Module: Source Aggregator
// Description: Concurrent fan-out over simulated sources with settled fan-in.
// Purpose: Report every source outcome plus summary statistics.
// Dependencies: crate::runtime::simulator, serde, tokio
// ============================================================================

//! ## Overview
//! [`Aggregator::aggregate`] starts one Tokio task per requested source and
//! waits for every task to settle. Results keep the input order no matter
//! which source finishes first. A failing source is recorded as an `error`
//! outcome and never fails the aggregation itself.
//!
//! Security posture: source names are caller input; they are echoed back but
//! never interpreted beyond the profile lookup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::runtime::simulator::SourceFetch;
use crate::runtime::simulator::SourcePayload;
use crate::runtime::simulator::SourceSimulator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Error message recorded for a task that panicked or was cancelled.
pub const UNSETTLED_TASK_MESSAGE: &str = "task failed to settle";

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Final status of one source in an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// The source returned a payload.
    Success,
    /// The source failed.
    Error,
}

/// Normalized outcome of one source.
///
/// # Invariants
/// - `data` is present exactly when `status` is [`SourceStatus::Success`].
/// - `error` is present exactly when `status` is [`SourceStatus::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutcome {
    /// Source name as requested.
    pub source: String,
    /// Final status.
    pub status: SourceStatus,
    /// Payload for successful sources.
    pub data: Option<SourcePayload>,
    /// Failure message for failed sources.
    pub error: Option<String>,
}

impl SourceOutcome {
    /// Normalizes a settled fetch.
    #[must_use]
    pub fn from_fetch(source: String, fetch: SourceFetch) -> Self {
        match fetch {
            SourceFetch::Success(payload) => Self {
                source,
                status: SourceStatus::Success,
                data: Some(payload),
                error: None,
            },
            SourceFetch::Failure(message) => Self::failure(source, message),
        }
    }

    /// Builds an error outcome for a task that never produced a fetch.
    #[must_use]
    pub fn unsettled(source: String) -> Self {
        Self::failure(source, UNSETTLED_TASK_MESSAGE.to_string())
    }

    /// Builds an error outcome.
    const fn failure(source: String, message: String) -> Self {
        Self {
            source,
            status: SourceStatus::Error,
            data: None,
            error: Some(message),
        }
    }

    /// Returns true when the source succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SourceStatus::Success
    }
}

/// Result of one aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// Outcomes in input order.
    pub results: Vec<SourceOutcome>,
    /// Wall time from fan-out to the last settled task.
    pub elapsed: Duration,
    /// Fraction of successful sources; zero for an empty request.
    pub success_rate: f64,
}

impl AggregateReport {
    /// Returns the number of successful sources.
    #[must_use]
    pub fn successes(&self) -> usize {
        self.results.iter().filter(|outcome| outcome.is_success()).count()
    }

    /// Returns the number of failed sources.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.results.len() - self.successes()
    }

    /// Formats the elapsed time as seconds with one decimal, e.g. `"0.8s"`.
    #[must_use]
    pub fn total_time_label(&self) -> String {
        format!("{:.1}s", self.elapsed.as_secs_f64())
    }
}

/// Computes `successes / total`, or zero when `total` is zero.
#[must_use]
pub fn success_rate(successes: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "Source counts stay far below 2^52."
    )]
    let rate = successes as f64 / total as f64;
    rate
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

/// Fan-out/fan-in coordinator over a [`SourceSimulator`].
pub struct Aggregator {
    /// Simulator answering each source.
    simulator: SourceSimulator,
}

impl Aggregator {
    /// Creates an aggregator over `simulator`.
    #[must_use]
    pub const fn new(simulator: SourceSimulator) -> Self {
        Self {
            simulator,
        }
    }

    /// Returns the underlying simulator.
    #[must_use]
    pub const fn simulator(&self) -> &SourceSimulator {
        &self.simulator
    }

    /// Queries every source concurrently and waits for all of them.
    ///
    /// Delays and outcomes are drawn in input order before any task starts,
    /// so a deterministic entropy source yields a deterministic report.
    pub async fn aggregate(&self, sources: &[String]) -> AggregateReport {
        let started = Instant::now();
        let tasks: Vec<(String, JoinHandle<SourceFetch>)> = sources
            .iter()
            .map(|source| {
                let pending = self.simulator.prepare(source);
                (source.clone(), tokio::spawn(pending.settle()))
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for (source, task) in tasks {
            let outcome = match task.await {
                Ok(fetch) => SourceOutcome::from_fetch(source, fetch),
                Err(_) => SourceOutcome::unsettled(source),
            };
            results.push(outcome);
        }

        let elapsed = started.elapsed();
        let successes = results.iter().filter(|outcome| outcome.is_success()).count();
        AggregateReport {
            success_rate: success_rate(successes, results.len()),
            results,
            elapsed,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
