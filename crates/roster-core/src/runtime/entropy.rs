// crates/roster-core/src/runtime/entropy.rs
// ============================================================================
// Module: Entropy Sources
// Description: Thread-local, seeded, and scripted uniform samplers.
// Purpose: Provide `EntropySource` implementations for the source simulator.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! [`ThreadEntropy`] draws from the thread-local RNG and is the production
//! default. [`SeededEntropy`] replays the same sequence for a given seed.
//! [`ScriptedEntropy`] returns a fixed queue of samples so tests can force
//! individual delays and outcomes.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::PoisonError;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::interfaces::EntropySource;

/// Entropy drawn from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

/// Deterministic entropy from a seeded RNG.
#[derive(Debug)]
pub struct SeededEntropy {
    /// Seeded generator shared by all callers.
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    /// Creates a generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn next_unit(&self) -> f64 {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).gen_range(0.0..1.0)
    }
}

/// Entropy that replays a fixed sequence of samples.
///
/// # Invariants
/// - Once the script is exhausted every draw returns `0.0`, which selects
///   the minimum delay and a successful outcome.
#[derive(Debug, Default)]
pub struct ScriptedEntropy {
    /// Remaining samples in draw order.
    samples: Mutex<VecDeque<f64>>,
}

impl ScriptedEntropy {
    /// Creates a source that yields `samples` in order.
    #[must_use]
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: Mutex::new(samples.into_iter().collect()),
        }
    }

    /// Returns how many scripted samples have not been drawn yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_unit(&self) -> f64 {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner).pop_front().unwrap_or(0.0)
    }
}
