//! Client configuration loaded from `~/.config/aicompare/config.toml`.
//!
//! Priority (highest first): command-line flags, environment variables
//! (`AICOMPARE_API_URL`, `AICOMPARE_OFFLINE`), the config file, built-in
//! defaults. Flags are applied by the binary; this module handles the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aicompare_core::CompareError;
use serde::{Deserialize, Serialize};

use crate::paths::AppPaths;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4000";
pub const ENV_API_URL: &str = "AICOMPARE_API_URL";
pub const ENV_OFFLINE: &str = "AICOMPARE_OFFLINE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the backend API
    pub base_url: String,
    /// Per-request timeout; requests are unbounded when unset
    pub timeout_secs: Option<u64>,
    /// Use the built-in simulated answers instead of the backend
    pub offline: bool,
    /// Artificial delay for simulated responses
    pub simulated_latency_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            offline: false,
            simulated_latency_ms: 0,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_OFFLINE) {
            self.offline = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }
}

/// Errors that can occur while loading the config file.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

impl From<ConfigStorageError> for CompareError {
    fn from(e: ConfigStorageError) -> Self {
        CompareError::config(e.to_string())
    }
}

/// Read-only access to the config file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage handle for the default path.
    pub fn new() -> Result<Self, ConfigStorageError> {
        let path = AppPaths::config_file().map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config; a missing or empty file yields the defaults.
    pub fn load(&self) -> Result<ClientConfig, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = toml::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), base_url = %config.base_url, "Loaded config");
        Ok(config)
    }
}

/// Loads the config from `path` (or the default location) and applies
/// environment overrides.
pub fn load_client_config(path: Option<&Path>) -> Result<ClientConfig, ConfigStorageError> {
    let storage = match path {
        Some(path) => ConfigStorage::with_path(path.to_path_buf()),
        None => ConfigStorage::new()?,
    };
    let mut config = storage.load()?;
    config.apply_env_overrides();
    Ok(config)
}
