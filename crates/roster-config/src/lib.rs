// crates/roster-config/src/lib.rs
// ============================================================================
// Module: Roster Config Library
// Description: Canonical config model, loader, and example payload.
// Purpose: Single source of truth for roster.toml semantics.
// Dependencies: roster-core, serde, toml
// ============================================================================

//! ## Overview
//! `roster-config` defines the configuration model for the directory server:
//! bind address and body limits, simulated source profiles and delays, sample
//! data seeding, and audit output. Loading validates before returning, so a
//! returned config is always internally consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
