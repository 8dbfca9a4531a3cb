// crates/roster-core/src/runtime/clock.rs
// ============================================================================
// Module: Clock Implementations
// Description: System and manually advanced clocks.
// Purpose: Provide production and test implementations of `Clock`.
// Dependencies: time
// ============================================================================

//! ## Overview
//! [`SystemClock`] reads UTC wall time. [`ManualClock`] only moves when told
//! to, which keeps timestamp assertions exact.

use std::sync::Mutex;
use std::sync::PoisonError;

use time::Duration;
use time::OffsetDateTime;

use crate::interfaces::Clock;

/// Clock backed by the system UTC time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that returns a fixed instant until advanced.
#[derive(Debug)]
pub struct ManualClock {
    /// Current instant.
    current: Mutex<OffsetDateTime>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub const fn new(start: OffsetDateTime) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `step`, saturating at the representable range.
    pub fn advance(&self, step: Duration) {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.saturating_add(step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
