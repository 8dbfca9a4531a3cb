// crates/roster-core/src/model/metrics.rs
// ============================================================================
// Module: API Metrics Model
// Description: Display-oriented performance metrics snapshot.
// Purpose: Define the singleton metrics payload and its partial update.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! [`ApiMetrics`] is a presentation snapshot, not a measurement. Values are
//! strings because the client renders them verbatim (`"1.2s"`, `"44%"`).

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

/// Default time-to-interactive label.
pub const DEFAULT_TTI: &str = "1.2s";
/// Default previous time-to-interactive label.
pub const DEFAULT_PREVIOUS_TTI: &str = "2.1s";
/// Default improvement label.
pub const DEFAULT_IMPROVEMENT: &str = "44%";
/// Default aggregated source count label.
pub const DEFAULT_API_SOURCES_COUNT: &str = "3";
/// Default search speed multiplier label.
pub const DEFAULT_SEARCH_SPEED_MULTIPLIER: &str = "2x";

/// Performance metrics snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetrics {
    /// Snapshot identifier, fixed for the process lifetime.
    pub id: String,
    /// Time to interactive.
    pub tti: String,
    /// Time to interactive before optimization.
    pub previous_tti: String,
    /// Relative improvement.
    pub improvement: String,
    /// Number of aggregated sources.
    pub api_sources_count: String,
    /// Search speedup label.
    pub search_speed_multiplier: String,
    /// Accessibility compliance flag.
    pub wcag_compliant: bool,
    /// Last mutation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl ApiMetrics {
    /// Builds the startup snapshot with default labels.
    #[must_use]
    pub fn initial(id: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            tti: DEFAULT_TTI.to_string(),
            previous_tti: DEFAULT_PREVIOUS_TTI.to_string(),
            improvement: DEFAULT_IMPROVEMENT.to_string(),
            api_sources_count: DEFAULT_API_SOURCES_COUNT.to_string(),
            search_speed_multiplier: DEFAULT_SEARCH_SPEED_MULTIPLIER.to_string(),
            wcag_compliant: true,
            last_updated: now,
        }
    }

    /// Merges a partial update and stamps `last_updated`.
    pub fn apply(&mut self, patch: ApiMetricsPatch, now: OffsetDateTime) {
        if let Some(tti) = patch.tti {
            self.tti = tti;
        }
        if let Some(previous_tti) = patch.previous_tti {
            self.previous_tti = previous_tti;
        }
        if let Some(improvement) = patch.improvement {
            self.improvement = improvement;
        }
        if let Some(count) = patch.api_sources_count {
            self.api_sources_count = count;
        }
        if let Some(multiplier) = patch.search_speed_multiplier {
            self.search_speed_multiplier = multiplier;
        }
        if let Some(compliant) = patch.wcag_compliant {
            self.wcag_compliant = compliant;
        }
        self.last_updated = now;
    }
}

/// Partial update for the metrics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetricsPatch {
    /// Replacement time to interactive.
    #[serde(default)]
    pub tti: Option<String>,
    /// Replacement previous time to interactive.
    #[serde(default)]
    pub previous_tti: Option<String>,
    /// Replacement improvement label.
    #[serde(default)]
    pub improvement: Option<String>,
    /// Replacement source count label.
    #[serde(default)]
    pub api_sources_count: Option<String>,
    /// Replacement search speedup label.
    #[serde(default)]
    pub search_speed_multiplier: Option<String>,
    /// Replacement compliance flag.
    #[serde(default)]
    pub wcag_compliant: Option<bool>,
}
