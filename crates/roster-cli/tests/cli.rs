// crates/roster-cli/tests/cli.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the roster binary.
// Purpose: Ensure config commands report results and failures via exit codes.
// Dependencies: roster-cli binary, tempfile
// ============================================================================

//! ## Overview
//! Runs the compiled binary in an isolated working directory with
//! `ROSTER_CONFIG` cleared, so implicit config resolution is deterministic.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn roster(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roster"))
        .args(args)
        .current_dir(dir)
        .env_remove("ROSTER_CONFIG")
        .output()
        .expect("run roster")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn version_flag_prints_package_version() {
    let dir = TempDir::new().unwrap();
    let output = roster(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("roster {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn validate_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let output = roster(dir.path(), &["config", "validate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("built-in defaults"));
    assert!(text.contains("3 sources"));
}

#[test]
fn example_config_validates() {
    let dir = TempDir::new().unwrap();
    let example = roster(dir.path(), &["config", "example"]);
    assert!(example.status.success());
    let path = dir.path().join("example.toml");
    fs::write(&path, &example.stdout).unwrap();

    let output = roster(dir.path(), &["config", "validate", "--config", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("example.toml"));
}

#[test]
fn implicit_roster_toml_is_picked_up() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("roster.toml"),
        "[server]\nbind = \"127.0.0.1:6100\"\n",
    )
    .unwrap();
    let output = roster(dir.path(), &["config", "validate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("bind 127.0.0.1:6100"));
}

#[test]
fn invalid_config_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[simulation]\nmax_sources = 0\n").unwrap();
    let output = roster(dir.path(), &["config", "validate", "--config", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let message = stderr(&output);
    assert!(message.contains("failed to load config"));
    assert!(message.contains("simulation.max_sources"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = roster(dir.path(), &["config", "validate", "--config", "absent.toml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("config io error"));
}

#[test]
fn serve_rejects_bad_bind_override_before_binding() {
    let dir = TempDir::new().unwrap();
    let output = roster(dir.path(), &["serve", "--bind", "not-an-address"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid server.bind address"));
}
