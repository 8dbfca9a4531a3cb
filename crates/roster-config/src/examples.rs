// crates/roster-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic starting point for operators and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example mirrors the built-in defaults, with every section spelled out.

/// Returns a canonical example `roster.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
bind = "127.0.0.1:5000"
max_body_bytes = 1048576

[simulation]
list_delay_ms = 300
error_delay_ms = 1000
max_sources = 16
default_source = "twitter"
# seed = 42

[[simulation.sources]]
name = "twitter"
min_delay_ms = 200
max_delay_ms = 800
success_probability = 0.95

[[simulation.sources]]
name = "imdb"
min_delay_ms = 500
max_delay_ms = 1500
success_probability = 0.85

[[simulation.sources]]
name = "wikipedia"
min_delay_ms = 300
max_delay_ms = 1200
success_probability = 0.90

[store]
seed_sample_data = true

[audit]
enabled = true
# path = "roster-audit.jsonl"
"#,
    )
}
