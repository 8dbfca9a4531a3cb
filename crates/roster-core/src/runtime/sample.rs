// crates/roster-core/src/runtime/sample.rs
// ============================================================================
// Module: Sample Directory Data
// Description: Demo employees loaded at startup.
// Purpose: Give the client something to list before any writes happen.
// Dependencies: crate::model
// ============================================================================

//! Six demo employees with stable emails and per-source statuses.

use std::collections::BTreeMap;

use crate::model::EmployeeStatus;
use crate::model::NewEmployee;

/// Static description of one sample employee.
struct SampleRow {
    /// Display name.
    name: &'static str,
    /// Job title.
    title: &'static str,
    /// Department name.
    department: &'static str,
    /// Contact email.
    email: &'static str,
    /// Presence status.
    status: EmployeeStatus,
    /// Skill tags.
    skills: [&'static str; 3],
    /// Avatar image URL.
    avatar: &'static str,
    /// Short biography.
    bio: &'static str,
    /// Office location.
    location: &'static str,
    /// Twitter, IMDB, and Wikipedia source statuses.
    sources: [&'static str; 3],
}

/// Sample rows in insertion order.
const SAMPLE_ROWS: [SampleRow; 6] = [
    SampleRow {
        name: "Sarah Chen",
        title: "Senior Frontend Engineer",
        department: "Engineering",
        email: "sarah.chen@company.com",
        status: EmployeeStatus::Active,
        skills: ["React", "TypeScript", "GraphQL"],
        avatar: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face",
        bio: "Passionate about creating accessible and performant user interfaces.",
        location: "San Francisco, CA",
        sources: ["success", "success", "success"],
    },
    SampleRow {
        name: "Marcus Rodriguez",
        title: "UX Designer",
        department: "Design",
        email: "marcus.rodriguez@company.com",
        status: EmployeeStatus::Remote,
        skills: ["Figma", "Prototyping", "Research"],
        avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
        bio: "Design thinking advocate with a focus on user-centered solutions.",
        location: "Austin, TX",
        sources: ["success", "error", "success"],
    },
    SampleRow {
        name: "Emily Watson",
        title: "Product Manager",
        department: "Marketing",
        email: "emily.watson@company.com",
        status: EmployeeStatus::Active,
        skills: ["Strategy", "Analytics", "Growth"],
        avatar: "https://images.unsplash.com/photo-1580489944761-15a19d654956?w=150&h=150&fit=crop&crop=face",
        bio: "Data-driven product strategist with 8+ years of experience.",
        location: "New York, NY",
        sources: ["success", "success", "success"],
    },
    SampleRow {
        name: "David Kim",
        title: "Backend Engineer",
        department: "Engineering",
        email: "david.kim@company.com",
        status: EmployeeStatus::Offline,
        skills: ["Node.js", "Python", "Redis"],
        avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
        bio: "Infrastructure specialist focused on scalable backend systems.",
        location: "Seattle, WA",
        sources: ["success", "success", "success"],
    },
    SampleRow {
        name: "Lisa Zhang",
        title: "Data Scientist",
        department: "Engineering",
        email: "lisa.zhang@company.com",
        status: EmployeeStatus::Active,
        skills: ["Python", "Machine Learning", "SQL"],
        avatar: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
        bio: "ML engineer building intelligent data pipelines.",
        location: "Boston, MA",
        sources: ["success", "success", "timeout"],
    },
    SampleRow {
        name: "Alex Thompson",
        title: "DevOps Engineer",
        department: "Engineering",
        email: "alex.thompson@company.com",
        status: EmployeeStatus::Remote,
        skills: ["Docker", "Kubernetes", "AWS"],
        avatar: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
        bio: "Cloud infrastructure expert with a passion for automation.",
        location: "Denver, CO",
        sources: ["error", "success", "success"],
    },
];

/// Source names paired with `SampleRow::sources`.
const SAMPLE_SOURCE_NAMES: [&str; 3] = ["twitter", "imdb", "wikipedia"];

/// Returns the demo employees in insertion order.
#[must_use]
pub fn sample_employees() -> Vec<NewEmployee> {
    SAMPLE_ROWS
        .iter()
        .map(|row| NewEmployee {
            name: row.name.to_string(),
            title: row.title.to_string(),
            department: row.department.to_string(),
            email: row.email.to_string(),
            status: row.status,
            skills: row.skills.iter().map(ToString::to_string).collect(),
            avatar: Some(row.avatar.to_string()),
            bio: Some(row.bio.to_string()),
            location: Some(row.location.to_string()),
            api_sources: SAMPLE_SOURCE_NAMES
                .iter()
                .zip(row.sources.iter())
                .map(|(source, status)| ((*source).to_string(), (*status).to_string()))
                .collect::<BTreeMap<_, _>>(),
        })
        .collect()
}
