// crates/roster-core/src/model/mod.rs
// ============================================================================
// Module: Roster Model Types
// Description: Canonical employee, filter, and metrics structures.
// Purpose: Provide stable, serializable types for the directory API.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Model types are the single source of truth for the JSON surface served by
//! the HTTP layer.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod employee;
pub mod filter;
pub mod metrics;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use employee::Employee;
pub use employee::EmployeePatch;
pub use employee::EmployeeStatus;
pub use employee::NewEmployee;
pub use filter::EmployeeFilter;
pub use metrics::ApiMetrics;
pub use metrics::ApiMetricsPatch;
