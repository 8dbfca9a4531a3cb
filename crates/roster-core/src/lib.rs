// crates/roster-core/src/lib.rs
// ============================================================================
// Module: Roster Core Library
// Description: Public API surface for the employee directory core.
// Purpose: Expose model types, injectable interfaces, and runtime components.
// Dependencies: crate::{interfaces, model, runtime}
// ============================================================================

//! ## Overview
//! Roster core holds the employee records, the display metrics snapshot, and
//! the simulated multi-source aggregation engine. It has no HTTP or config
//! knowledge; the server crate wires these pieces into request handlers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod interfaces;
pub mod model;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use interfaces::Clock;
pub use interfaces::EntropySource;
pub use model::ApiMetrics;
pub use model::ApiMetricsPatch;
pub use model::Employee;
pub use model::EmployeeFilter;
pub use model::EmployeePatch;
pub use model::EmployeeStatus;
pub use model::NewEmployee;
pub use runtime::AggregateReport;
pub use runtime::Aggregator;
pub use runtime::CatalogError;
pub use runtime::DEFAULT_SOURCES;
pub use runtime::EmployeeStore;
pub use runtime::ManualClock;
pub use runtime::MetricsError;
pub use runtime::MetricsHolder;
pub use runtime::ScriptedEntropy;
pub use runtime::SeededEntropy;
pub use runtime::SourceCatalog;
pub use runtime::SourceFetch;
pub use runtime::SourceOutcome;
pub use runtime::SourcePayload;
pub use runtime::SourceProfile;
pub use runtime::SourceSimulator;
pub use runtime::SourceStatus;
pub use runtime::StoreError;
pub use runtime::SystemClock;
pub use runtime::ThreadEntropy;
