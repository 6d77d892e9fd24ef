// firegate-server/src/config.rs
// ============================================================================
// Module: Firegate Server Configuration
// Description: Configuration loading and validation for the Firegate server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! validated before the server starts. Missing files fall back to defaults;
//! invalid configuration fails closed rather than starting a misconfigured
//! server.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "firegate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "FIREGATE_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Default server bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8787";
/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Maximum allowed request body size in bytes.
const MAX_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;
/// Default requests allowed per rate limit window.
pub(crate) const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 120;
/// Default rate limit window in seconds (15 minutes).
pub(crate) const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 900;
/// Default maximum tracked rate limit clients.
pub(crate) const DEFAULT_RATE_LIMIT_MAX_ENTRIES: usize = 4_096;
/// Minimum allowed rate limit window in seconds.
const MIN_RATE_LIMIT_WINDOW_SECS: u64 = 1;
/// Maximum allowed rate limit window in seconds.
const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 86_400;
/// Maximum allowed requests per rate limit window.
const MAX_RATE_LIMIT_REQUESTS: u32 = 100_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Firegate server configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiregateConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Vault root directory holding `vault_map.json`.
    #[serde(default = "default_vault_root")]
    pub vault_root: PathBuf,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Per-client rate limiting; enabled by default.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            vault_root: default_vault_root(),
            max_body_bytes: default_max_body_bytes(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Fixed-window rate limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window per client.
    #[serde(default = "default_rate_limit_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "default_rate_limit_window_secs")]
    pub window_secs: u64,
    /// Maximum number of tracked clients.
    #[serde(default = "default_rate_limit_max_entries")]
    pub max_entries: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            max_entries: DEFAULT_RATE_LIMIT_MAX_ENTRIES,
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bind address value.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default vault root value (the working directory).
fn default_vault_root() -> PathBuf {
    PathBuf::from(".")
}

/// Default maximum body size value.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default rate limit request count value.
const fn default_rate_limit_max_requests() -> u32 {
    DEFAULT_RATE_LIMIT_MAX_REQUESTS
}

/// Default rate limit window value.
const fn default_rate_limit_window_secs() -> u64 {
    DEFAULT_RATE_LIMIT_WINDOW_SECS
}

/// Default rate limit entry cap value.
const fn default_rate_limit_max_entries() -> usize {
    DEFAULT_RATE_LIMIT_MAX_ENTRIES
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl FiregateConfig {
    /// Loads configuration from the given path, the `FIREGATE_CONFIG`
    /// environment variable, or the default filename, in that order. A
    /// missing default file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match env::var(CONFIG_ENV_VAR) {
                Ok(value) => (PathBuf::from(value), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_NAME), false),
            },
        };

        if !resolved.exists() {
            if explicit {
                return Err(ConfigError::Missing(resolved.display().to_string()));
            }
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let metadata = fs::metadata(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge(resolved.display().to_string()));
        }

        let content = fs::read_to_string(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        let config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any value is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        if self.server.max_body_bytes == 0 || self.server.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes out of bounds: {}",
                self.server.max_body_bytes
            )));
        }
        let rate_limit = &self.server.rate_limit;
        if rate_limit.max_requests == 0 || rate_limit.max_requests > MAX_RATE_LIMIT_REQUESTS {
            return Err(ConfigError::Invalid(format!(
                "server.rate_limit.max_requests out of bounds: {}",
                rate_limit.max_requests
            )));
        }
        if rate_limit.window_secs < MIN_RATE_LIMIT_WINDOW_SECS
            || rate_limit.window_secs > MAX_RATE_LIMIT_WINDOW_SECS
        {
            return Err(ConfigError::Invalid(format!(
                "server.rate_limit.window_secs out of bounds: {}",
                rate_limit.window_secs
            )));
        }
        if rate_limit.max_entries == 0 {
            return Err(ConfigError::Invalid(
                "server.rate_limit.max_entries must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly named config file does not exist.
    #[error("config file not found: {0}")]
    Missing(String),
    /// The config file exceeds the size limit.
    #[error("config file too large: {0}")]
    TooLarge(String),
    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The config file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A config value is out of bounds.
    #[error("config invalid: {0}")]
    Invalid(String),
}
