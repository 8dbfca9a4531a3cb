// crates/roster-core/src/runtime/metrics.rs
// ============================================================================
// Module: Metrics Holder
// Description: Process-wide owner of the API metrics snapshot.
// Purpose: Serve and merge-update the display metrics singleton.
// Dependencies: crate::{interfaces, model}, uuid
// ============================================================================

//! ## Overview
//! One [`MetricsHolder`] exists per server. Updates are last-write-wins.

use std::sync::Arc;
use std::sync::Mutex;

use thiserror::Error;
use uuid::Uuid;

use crate::interfaces::Clock;
use crate::model::ApiMetrics;
use crate::model::ApiMetricsPatch;

/// Metrics holder errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    /// The snapshot mutex was poisoned by a panicking writer.
    #[error("metrics mutex poisoned")]
    Poisoned,
}

/// Owner of the metrics snapshot.
pub struct MetricsHolder {
    /// Current snapshot.
    snapshot: Mutex<ApiMetrics>,
    /// Timestamp source for `last_updated`.
    clock: Arc<dyn Clock>,
}

impl MetricsHolder {
    /// Creates the holder with the default startup snapshot.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let snapshot = ApiMetrics::initial(Uuid::new_v4().to_string(), clock.now());
        Self {
            snapshot: Mutex::new(snapshot),
            clock,
        }
    }

    /// Returns the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Poisoned`] when the lock is unusable.
    pub fn get(&self) -> Result<ApiMetrics, MetricsError> {
        self.snapshot.lock().map(|guard| guard.clone()).map_err(|_| MetricsError::Poisoned)
    }

    /// Merges `patch` into the snapshot and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Poisoned`] when the lock is unusable.
    pub fn update(&self, patch: ApiMetricsPatch) -> Result<ApiMetrics, MetricsError> {
        let now = self.clock.now();
        let mut guard = self.snapshot.lock().map_err(|_| MetricsError::Poisoned)?;
        guard.apply(patch, now);
        Ok(guard.clone())
    }
}
