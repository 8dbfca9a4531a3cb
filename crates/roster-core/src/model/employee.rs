// crates/roster-core/src/model/employee.rs
// ============================================================================
// Module: Employee Model
// Description: Employee records, insert payloads, and partial updates.
// Purpose: Provide the canonical serialized shape of directory entries.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Employee types mirror the JSON contract served under `/api/employees`.
//! Field names serialize in camelCase and timestamps use RFC 3339.
//! [`NewEmployee`] and [`EmployeePatch`] are the only inputs accepted by the
//! store; identifiers and timestamps are always assigned by the store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Presence status for an employee.
///
/// # Invariants
/// - Labels are stable wire values (`active`, `remote`, `offline`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Working on site.
    #[default]
    Active,
    /// Working remotely.
    Remote,
    /// Not currently available.
    Offline,
}

impl EmployeeStatus {
    /// Every status in declaration order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Remote, Self::Offline];

    /// Returns the stable wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Remote => "remote",
            Self::Offline => "offline",
        }
    }

    /// Parses a wire label into a status.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == label)
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Employee
// ============================================================================

/// Stored employee record.
///
/// # Invariants
/// - `id` and `email` are unique across the store.
/// - `updated_at` is never earlier than `created_at` for a given clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Opaque identifier assigned on creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Department name.
    pub department: String,
    /// Contact email.
    pub email: String,
    /// Presence status.
    pub status: EmployeeStatus,
    /// Ordered skill tags.
    pub skills: Vec<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Short biography.
    pub bio: Option<String>,
    /// Office location.
    pub location: Option<String>,
    /// Last known status per profile source.
    pub api_sources: BTreeMap<String, String>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last mutation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Employee {
    /// Builds a stored record from an insert payload.
    #[must_use]
    pub fn from_new(id: String, new: NewEmployee, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: new.name,
            title: new.title,
            department: new.department,
            email: new.email,
            status: new.status,
            skills: new.skills,
            avatar: new.avatar,
            bio: new.bio,
            location: new.location,
            api_sources: new.api_sources,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a partial update over this record and stamps `updated_at`.
    pub fn apply(&mut self, patch: EmployeePatch, now: OffsetDateTime) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(api_sources) = patch.api_sources {
            self.api_sources = api_sources;
        }
        self.updated_at = now;
    }
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Insert payload for a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Department name.
    pub department: String,
    /// Contact email.
    pub email: String,
    /// Presence status (defaults to `active`).
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Ordered skill tags (defaults to empty).
    #[serde(default)]
    pub skills: Vec<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Office location.
    #[serde(default)]
    pub location: Option<String>,
    /// Last known status per profile source (defaults to empty).
    #[serde(default)]
    pub api_sources: BTreeMap<String, String>,
}

/// Partial update for an existing employee.
///
/// Absent fields are left untouched. Nullable fields distinguish an absent
/// key (`None`) from an explicit `null` (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    /// Replacement display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement job title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement department.
    #[serde(default)]
    pub department: Option<String>,
    /// Replacement email.
    #[serde(default)]
    pub email: Option<String>,
    /// Replacement status.
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    /// Replacement skill list.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Replacement avatar (explicit `null` clears it).
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: Option<Option<String>>,
    /// Replacement biography (explicit `null` clears it).
    #[serde(default, deserialize_with = "nullable")]
    pub bio: Option<Option<String>>,
    /// Replacement location (explicit `null` clears it).
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    /// Replacement source status map.
    #[serde(default)]
    pub api_sources: Option<BTreeMap<String, String>>,
}

/// Deserializes a present key as `Some`, keeping `null` as `Some(None)`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
