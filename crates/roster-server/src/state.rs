// crates/roster-server/src/state.rs
// ============================================================================
// Module: Application State
// Description: Shared handler state and its construction from config.
// Purpose: Inject owned core components into every request handler.
// Dependencies: roster-config, roster-core
// ============================================================================

//! ## Overview
//! [`AppState`] is cloned into every handler. It only holds `Arc`s, so clones
//! share one store, one metrics holder, and one aggregator.
//! [`AppState::from_config`] is the production wiring; tests assemble
//! [`StateParts`] directly to inject scripted clocks, entropy, and sinks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use roster_config::RosterConfig;
use roster_core::Aggregator;
use roster_core::Clock;
use roster_core::EmployeeStore;
use roster_core::EntropySource;
use roster_core::MetricsHolder;
use roster_core::SeededEntropy;
use roster_core::SourceSimulator;
use roster_core::SystemClock;
use roster_core::ThreadEntropy;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::server::ServerError;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestMetrics;
use crate::validation::PayloadValidator;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Handler timing and limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSettings {
    /// Artificial delay before listing employees.
    pub list_delay: Duration,
    /// Delay before a simulated error response.
    pub error_delay: Duration,
    /// Maximum sources per aggregation request.
    pub max_sources: usize,
}

impl HandlerSettings {
    /// Reads settings from configuration.
    #[must_use]
    pub const fn from_config(config: &RosterConfig) -> Self {
        Self {
            list_delay: config.simulation.list_delay(),
            error_delay: config.simulation.error_delay(),
            max_sources: config.simulation.max_sources,
        }
    }
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Components assembled into an [`AppState`].
pub struct StateParts {
    /// Employee records.
    pub store: Arc<EmployeeStore>,
    /// Metrics snapshot.
    pub metrics: Arc<MetricsHolder>,
    /// Source aggregation engine.
    pub aggregator: Arc<Aggregator>,
    /// Audit event sink.
    pub audit: Arc<dyn AuditSink>,
    /// Request metrics sink.
    pub telemetry: Arc<dyn RequestMetrics>,
    /// Timing and limits.
    pub settings: HandlerSettings,
}

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    /// Employee records.
    pub store: Arc<EmployeeStore>,
    /// Metrics snapshot.
    pub metrics: Arc<MetricsHolder>,
    /// Source aggregation engine.
    pub aggregator: Arc<Aggregator>,
    /// Compiled body schemas.
    pub validator: Arc<PayloadValidator>,
    /// Audit event sink.
    pub audit: Arc<dyn AuditSink>,
    /// Request metrics sink.
    pub telemetry: Arc<dyn RequestMetrics>,
    /// Timing and limits.
    pub settings: HandlerSettings,
}

impl AppState {
    /// Assembles state from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Init`] when the body schemas fail to compile.
    pub fn new(parts: StateParts) -> Result<Self, ServerError> {
        let validator =
            PayloadValidator::new().map_err(|err| ServerError::Init(err.to_string()))?;
        Ok(Self {
            store: parts.store,
            metrics: parts.metrics,
            aggregator: parts.aggregator,
            validator: Arc::new(validator),
            audit: parts.audit,
            telemetry: parts.telemetry,
            settings: parts.settings,
        })
    }

    /// Builds production state from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the source catalog, sample data, or
    /// audit sink cannot be initialized.
    pub fn from_config(config: &RosterConfig) -> Result<Self, ServerError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let entropy: Arc<dyn EntropySource> = match config.simulation.seed {
            Some(seed) => Arc::new(SeededEntropy::new(seed)),
            None => Arc::new(ThreadEntropy),
        };
        let catalog = config
            .simulation
            .source_catalog()
            .map_err(|err| ServerError::Config(err.to_string()))?;
        let store = if config.store.seed_sample_data {
            EmployeeStore::with_sample_data(Arc::clone(&clock))
                .map_err(|err| ServerError::Init(err.to_string()))?
        } else {
            EmployeeStore::new(Arc::clone(&clock))
        };
        Self::new(StateParts {
            store: Arc::new(store),
            metrics: Arc::new(MetricsHolder::new(clock)),
            aggregator: Arc::new(Aggregator::new(SourceSimulator::new(catalog, entropy))),
            audit: build_audit_sink(config)?,
            telemetry: Arc::new(NoopMetrics),
            settings: HandlerSettings::from_config(config),
        })
    }
}

/// Selects the audit sink described by configuration.
fn build_audit_sink(config: &RosterConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    if !config.audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(path)
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}
