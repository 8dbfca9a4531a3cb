// crates/roster-core/src/interfaces/mod.rs
// ============================================================================
// Module: Roster Interfaces
// Description: Injectable time and randomness sources.
// Purpose: Decouple runtime components from wall clocks and global RNGs.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Runtime components never read the wall clock or a global RNG directly.
//! They receive a [`Clock`] and an [`EntropySource`] at construction so tests
//! can script timestamps and force simulated outcomes.

use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of wall-clock timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> OffsetDateTime;
}

// ============================================================================
// SECTION: Entropy
// ============================================================================

/// Source of uniform random samples for the source simulator.
///
/// # Invariants
/// - Returned samples lie in `[0, 1)`; callers clamp anything else.
pub trait EntropySource: Send + Sync {
    /// Returns the next uniform sample.
    fn next_unit(&self) -> f64;
}
