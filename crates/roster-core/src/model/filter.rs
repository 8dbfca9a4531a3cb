// crates/roster-core/src/model/filter.rs
// ============================================================================
// Module: Employee Filter
// Description: Conjunctive query predicates over employee records.
// Purpose: Evaluate search, department, and status filters.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`EmployeeFilter`] is deserialized straight from the list query string.
//! Every provided predicate must hold for a record to match. Empty strings
//! count as absent so a blank search box lists everything.

use serde::Deserialize;

use crate::model::employee::Employee;

/// Filter predicates for employee listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeFilter {
    /// Case-insensitive substring over name, title, department, or skills.
    #[serde(default)]
    pub search: Option<String>,
    /// Case-insensitive exact department match.
    #[serde(default)]
    pub department: Option<String>,
    /// Exact status label match.
    #[serde(default)]
    pub status: Option<String>,
}

impl EmployeeFilter {
    /// Returns true when no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        active(self.search.as_ref()).is_none()
            && active(self.department.as_ref()).is_none()
            && active(self.status.as_ref()).is_none()
    }

    /// Returns true when the employee satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(search) = active(self.search.as_ref()) {
            let needle = search.to_lowercase();
            let hit = contains_folded(&employee.name, &needle)
                || contains_folded(&employee.title, &needle)
                || contains_folded(&employee.department, &needle)
                || employee.skills.iter().any(|skill| contains_folded(skill, &needle));
            if !hit {
                return false;
            }
        }
        if let Some(department) = active(self.department.as_ref())
            && employee.department.to_lowercase() != department.to_lowercase()
        {
            return false;
        }
        if let Some(status) = active(self.status.as_ref())
            && employee.status.as_str() != status
        {
            return false;
        }
        true
    }
}

/// Returns the predicate value when present and non-empty.
fn active(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

/// Lowercases `haystack` and checks for an already-lowercased needle.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
