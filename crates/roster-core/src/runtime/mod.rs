// crates/roster-core/src/runtime/mod.rs
// ============================================================================
// Module: Roster Runtime
// Description: Employee store, metrics holder, source simulator, aggregator.
// Purpose: Own the directory state and the simulated aggregation engine.
// Dependencies: crate::{interfaces, model}, rand, tokio, uuid
// ============================================================================

//! ## Overview
//! Runtime components are explicitly owned objects. The HTTP layer holds them
//! behind `Arc` in its application state; nothing here is a global.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod aggregator;
pub mod clock;
pub mod entropy;
pub mod metrics;
pub mod sample;
pub mod simulator;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregator::AggregateReport;
pub use aggregator::Aggregator;
pub use aggregator::SourceOutcome;
pub use aggregator::SourceStatus;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use entropy::ScriptedEntropy;
pub use entropy::SeededEntropy;
pub use entropy::ThreadEntropy;
pub use metrics::MetricsError;
pub use metrics::MetricsHolder;
pub use simulator::CatalogError;
pub use simulator::DEFAULT_SOURCES;
pub use simulator::PendingFetch;
pub use simulator::SourceCatalog;
pub use simulator::SourceFetch;
pub use simulator::SourcePayload;
pub use simulator::SourceProfile;
pub use simulator::SourceSimulator;
pub use store::EmployeeStore;
pub use store::StoreError;
