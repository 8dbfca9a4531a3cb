// crates/roster-core/src/runtime/simulator.rs
// ============================================================================
// Module: Source Simulator
// Description: Latency- and failure-prone fake upstream profile sources.
// Purpose: Produce realistic loading and error states without real I/O.
// Dependencies: crate::interfaces, serde, thiserror, tokio
// ============================================================================

//! ## Overview
//! Each named source has a [`SourceProfile`] describing its delay range and
//! success probability. A fetch happens in two phases: [`SourceSimulator::prepare`]
//! draws the delay and outcome synchronously, then [`PendingFetch::settle`]
//! sleeps on the Tokio timer and yields the outcome. Keeping the draws
//! synchronous makes the sample order independent of task scheduling.
//! Unknown source names use the catalog's default profile.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::interfaces::EntropySource;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sources queried when a caller does not name any.
pub const DEFAULT_SOURCES: [&str; 3] = ["twitter", "imdb", "wikipedia"];
/// Source whose profile backs unknown names in the built-in catalog.
pub const DEFAULT_FALLBACK_SOURCE: &str = "twitter";

// ============================================================================
// SECTION: Profiles
// ============================================================================

/// Latency and reliability profile for one simulated source.
///
/// # Invariants
/// - `min_delay_ms <= max_delay_ms`.
/// - `success_probability` lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Shortest simulated latency in milliseconds.
    pub min_delay_ms: u64,
    /// Longest simulated latency in milliseconds.
    pub max_delay_ms: u64,
    /// Probability that a fetch succeeds.
    pub success_probability: f64,
}

impl SourceProfile {
    /// Creates a profile from its parts.
    #[must_use]
    pub const fn new(min_delay_ms: u64, max_delay_ms: u64, success_probability: f64) -> Self {
        Self {
            min_delay_ms,
            max_delay_ms,
            success_probability,
        }
    }

    /// Checks the profile invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidProfile`] when an invariant fails.
    pub fn validate(&self, name: &str) -> Result<(), CatalogError> {
        if self.min_delay_ms > self.max_delay_ms {
            return Err(CatalogError::InvalidProfile {
                name: name.to_string(),
                reason: "min_delay_ms exceeds max_delay_ms".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err(CatalogError::InvalidProfile {
                name: name.to_string(),
                reason: "success_probability must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    /// Maps a uniform sample onto the delay range, in milliseconds.
    fn delay_ms(&self, unit: f64) -> f64 {
        let span = (self.max_delay_ms - self.min_delay_ms) as f64;
        (self.min_delay_ms as f64) + clamp_unit(unit) * span
    }
}

/// Catalog construction errors.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A profile violates its invariants.
    #[error("source profile {name} is invalid: {reason}")]
    InvalidProfile {
        /// Source name.
        name: String,
        /// Violated invariant.
        reason: String,
    },
    /// A source name is empty.
    #[error("source names must be non-empty")]
    EmptyName,
    /// The fallback source is not in the catalog.
    #[error("default source {0} is not configured")]
    UnknownDefault(String),
}

/// Named source profiles plus the fallback for unknown names.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCatalog {
    /// Profiles by source name.
    profiles: BTreeMap<String, SourceProfile>,
    /// Profile used for names not in `profiles`.
    fallback: SourceProfile,
}

impl SourceCatalog {
    /// Builds a catalog, using `default_source` as the fallback profile.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a profile is invalid or the default
    /// source is missing.
    pub fn new(
        profiles: BTreeMap<String, SourceProfile>,
        default_source: &str,
    ) -> Result<Self, CatalogError> {
        for (name, profile) in &profiles {
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            profile.validate(name)?;
        }
        let fallback = *profiles
            .get(default_source)
            .ok_or_else(|| CatalogError::UnknownDefault(default_source.to_string()))?;
        Ok(Self {
            profiles,
            fallback,
        })
    }

    /// Returns the built-in twitter, imdb, and wikipedia profiles.
    #[must_use]
    pub fn builtin() -> Self {
        let profiles = builtin_profiles();
        let fallback = profiles
            .get(DEFAULT_FALLBACK_SOURCE)
            .copied()
            .unwrap_or(SourceProfile::new(200, 800, 0.95));
        Self {
            profiles,
            fallback,
        }
    }

    /// Returns the profile for `source`, falling back for unknown names.
    #[must_use]
    pub fn profile(&self, source: &str) -> &SourceProfile {
        self.profiles.get(source).unwrap_or(&self.fallback)
    }

    /// Returns the configured source names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Returns the built-in source profiles.
#[must_use]
pub fn builtin_profiles() -> BTreeMap<String, SourceProfile> {
    BTreeMap::from([
        ("twitter".to_string(), SourceProfile::new(200, 800, 0.95)),
        ("imdb".to_string(), SourceProfile::new(500, 1500, 0.85)),
        ("wikipedia".to_string(), SourceProfile::new(300, 1200, 0.90)),
    ])
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Payload returned by a successful simulated fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePayload {
    /// Source name.
    pub source: String,
    /// Mock profile body.
    pub profile: String,
    /// Rounded simulated latency, e.g. `"412ms"`.
    pub load_time: String,
}

/// Settled result of one simulated fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFetch {
    /// The source answered.
    Success(SourcePayload),
    /// The source was unavailable.
    Failure(String),
}

impl SourceFetch {
    /// Returns true for a successful fetch.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// A fetch whose delay and outcome are already drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    /// Source name.
    source: String,
    /// Simulated latency.
    delay: Duration,
    /// Simulated latency in milliseconds, before rounding.
    delay_ms: f64,
    /// Whether the fetch will succeed.
    succeed: bool,
}

impl PendingFetch {
    /// Returns the source name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the drawn latency.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns whether the fetch will succeed.
    #[must_use]
    pub const fn will_succeed(&self) -> bool {
        self.succeed
    }

    /// Waits out the drawn latency and produces the outcome.
    pub async fn settle(self) -> SourceFetch {
        tokio::time::sleep(self.delay).await;
        if self.succeed {
            SourceFetch::Success(SourcePayload {
                profile: format!("Mock {} profile data", self.source),
                load_time: format!("{}ms", self.delay_ms.round()),
                source: self.source,
            })
        } else {
            SourceFetch::Failure(format!("{} API temporarily unavailable", self.source))
        }
    }
}

// ============================================================================
// SECTION: Simulator
// ============================================================================

/// Simulator for named upstream sources.
pub struct SourceSimulator {
    /// Source profiles.
    catalog: SourceCatalog,
    /// Uniform sample source.
    entropy: Arc<dyn EntropySource>,
}

impl SourceSimulator {
    /// Creates a simulator over `catalog` drawing from `entropy`.
    #[must_use]
    pub fn new(catalog: SourceCatalog, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            catalog,
            entropy,
        }
    }

    /// Returns the source catalog.
    #[must_use]
    pub const fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Draws the delay, then the outcome, for one fetch of `source`.
    #[must_use]
    pub fn prepare(&self, source: &str) -> PendingFetch {
        let profile = self.catalog.profile(source);
        let delay_ms = profile.delay_ms(self.entropy.next_unit());
        let succeed = clamp_unit(self.entropy.next_unit()) < profile.success_probability;
        let delay = Duration::try_from_secs_f64(delay_ms / 1000.0)
            .unwrap_or(Duration::from_millis(profile.min_delay_ms));
        PendingFetch {
            source: source.to_string(),
            delay,
            delay_ms,
            succeed,
        }
    }

    /// Fetches `source`, suspending for the simulated latency.
    pub async fn fetch(&self, source: &str) -> SourceFetch {
        self.prepare(source).settle().await
    }
}

/// Clamps a sample into `[0, 1]`, mapping NaN to zero.
fn clamp_unit(unit: f64) -> f64 {
    if unit.is_nan() { 0.0 } else { unit.clamp(0.0, 1.0) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
