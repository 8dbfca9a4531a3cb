// crates/roster-config/src/config.rs
// ============================================================================
// Module: Roster Configuration
// Description: Configuration loading and validation for the directory server.
// Purpose: Provide strict config parsing with hard limits and safe defaults.
// Dependencies: roster-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `ROSTER_CONFIG`, then `roster.toml`
//! in the working directory. Only the implicit default file may be absent;
//! an explicitly named file that cannot be read is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use roster_core::SourceCatalog;
use roster_core::SourceProfile;
use roster_core::runtime::simulator::builtin_profiles;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "roster.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ROSTER_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for any configured delay in milliseconds.
pub const MAX_DELAY_MS: u64 = 60_000;
/// Upper bound for `simulation.max_sources`.
pub const MAX_SOURCES_LIMIT: usize = 256;
/// Default bind address.
const DEFAULT_BIND: &str = "127.0.0.1:5000";
/// Default artificial delay before listing employees.
const DEFAULT_LIST_DELAY_MS: u64 = 300;
/// Default delay before a simulated error response.
const DEFAULT_ERROR_DELAY_MS: u64 = 1000;
/// Default cap on sources per aggregation request.
const DEFAULT_MAX_SOURCES: usize = 16;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Simulated source configuration.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Employee store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Audit output configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// File the config was read from, when any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl RosterConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let mut config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        let mut config = Self::from_bytes(&bytes)?;
        config.source_path = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration from raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the payload is oversized, not UTF-8,
    /// not valid TOML, or fails validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.simulation.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid server.bind address: {}", self.bind)))
    }

    /// Validates listener settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        self.bind_addr()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Simulation
// ============================================================================

/// Simulated delay and source profile configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Artificial delay before listing employees, in milliseconds.
    #[serde(default = "default_list_delay_ms")]
    pub list_delay_ms: u64,
    /// Delay before a simulated error response, in milliseconds.
    #[serde(default = "default_error_delay_ms")]
    pub error_delay_ms: u64,
    /// Maximum number of sources per aggregation request.
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
    /// Seed for reproducible simulation; thread entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Source whose profile serves unknown source names.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// Source profiles; replaces the built-in set when present.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            list_delay_ms: default_list_delay_ms(),
            error_delay_ms: default_error_delay_ms(),
            max_sources: default_max_sources(),
            seed: None,
            default_source: default_source(),
            sources: default_sources(),
        }
    }
}

impl SimulationConfig {
    /// Returns the list delay as a duration.
    #[must_use]
    pub const fn list_delay(&self) -> Duration {
        Duration::from_millis(self.list_delay_ms)
    }

    /// Returns the error delay as a duration.
    #[must_use]
    pub const fn error_delay(&self) -> Duration {
        Duration::from_millis(self.error_delay_ms)
    }

    /// Builds the source catalog from the configured profiles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the profiles do not form a
    /// valid catalog.
    pub fn source_catalog(&self) -> Result<SourceCatalog, ConfigError> {
        let profiles: BTreeMap<String, SourceProfile> =
            self.sources.iter().map(|source| (source.name.clone(), source.profile())).collect();
        SourceCatalog::new(profiles, &self.default_source)
            .map_err(|err| ConfigError::Invalid(format!("simulation.sources: {err}")))
    }

    /// Validates delays, limits, and source profiles.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.list_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "simulation.list_delay_ms must be at most {MAX_DELAY_MS}"
            )));
        }
        if self.error_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "simulation.error_delay_ms must be at most {MAX_DELAY_MS}"
            )));
        }
        if self.max_sources == 0 || self.max_sources > MAX_SOURCES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "simulation.max_sources must be between 1 and {MAX_SOURCES_LIMIT}"
            )));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid(
                "simulation.sources must contain at least one source".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for source in &self.sources {
            source.validate()?;
            if !seen.insert(source.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate simulation.sources.name: {}",
                    source.name
                )));
            }
        }
        if !seen.contains(self.default_source.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "simulation.default_source {} is not a configured source",
                self.default_source
            )));
        }
        Ok(())
    }
}

/// One simulated source profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    /// Source name as used in aggregation requests.
    pub name: String,
    /// Shortest simulated latency in milliseconds.
    pub min_delay_ms: u64,
    /// Longest simulated latency in milliseconds.
    pub max_delay_ms: u64,
    /// Probability that a fetch succeeds.
    pub success_probability: f64,
}

impl SourceConfig {
    /// Returns the runtime profile for this source.
    #[must_use]
    pub const fn profile(&self) -> SourceProfile {
        SourceProfile::new(self.min_delay_ms, self.max_delay_ms, self.success_probability)
    }

    /// Validates the source entry.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "simulation.sources.name must be non-empty".to_string(),
            ));
        }
        if self.name.trim() != self.name {
            return Err(ConfigError::Invalid(
                "simulation.sources.name must be trimmed".to_string(),
            ));
        }
        if self.max_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "simulation.sources.max_delay_ms must be at most {MAX_DELAY_MS}"
            )));
        }
        self.profile()
            .validate(&self.name)
            .map_err(|err| ConfigError::Invalid(format!("simulation.sources: {err}")))
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Employee store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Seed the store with demo employees at startup.
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Emit audit events.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// JSON-lines output file; stderr when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates the audit output path.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("audit.path must be non-empty".to_string()));
            }
            validate_path(path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and whether it was named explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default maximum request body size.
pub(crate) const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default list delay.
const fn default_list_delay_ms() -> u64 {
    DEFAULT_LIST_DELAY_MS
}

/// Default error delay.
const fn default_error_delay_ms() -> u64 {
    DEFAULT_ERROR_DELAY_MS
}

/// Default per-request source cap.
const fn default_max_sources() -> usize {
    DEFAULT_MAX_SOURCES
}

/// Default fallback source name.
fn default_source() -> String {
    roster_core::runtime::simulator::DEFAULT_FALLBACK_SOURCE.to_string()
}

/// Built-in source profiles as config entries.
fn default_sources() -> Vec<SourceConfig> {
    builtin_profiles()
        .into_iter()
        .map(|(name, profile)| SourceConfig {
            name,
            min_delay_ms: profile.min_delay_ms,
            max_delay_ms: profile.max_delay_ms,
            success_probability: profile.success_probability,
        })
        .collect()
}

/// Serde default for enabled-by-default flags.
const fn default_true() -> bool {
    true
}
