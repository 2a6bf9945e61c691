//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     USTOCK_API_URL=http://localhost:8000                               │
//! │     USTOCK_API_TIMEOUT_SECS=10                                         │
//! │     USTOCK_DB_PATH=/tmp/ustock.db                                      │
//! │     USTOCK_EXPIRING_DAYS=5                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ustock/ustock.toml (Linux)                               │
//! │     ~/Library/Application Support/fr.totooche.ustock/ustock.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://api.ustock.totooche.fr:8443"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/ustock.db"
//!
//! [display]
//! expiring_days = 3
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use ustock_core::EXPIRING_SOON_DAYS;
use ustock_resolver::{ResolverConfig, ResolverError};

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Api(#[from] ResolverError),

    #[error("Could not determine the platform directories")]
    NoProjectDirs,
}

// =============================================================================
// Sections
// =============================================================================

/// Where the store lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Database file. Default: `ustock.db` in the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Window used by `ustock expiring` and the "soon" status.
    #[serde(default = "default_expiring_days")]
    pub expiring_days: i64,
}

fn default_expiring_days() -> i64 {
    EXPIRING_SOON_DAYS
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            expiring_days: default_expiring_days(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ResolverConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from `path` (if it exists), applies environment
    /// overrides and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::read(path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without overrides or validation.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(write_err)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;

        if self.display.expiring_days < 0 {
            return Err(ConfigError::Invalid(
                "display.expiring_days must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `USTOCK_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparsable numbers are ignored
    /// with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("USTOCK_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("USTOCK_API_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = Some(secs),
                Err(_) => warn!(value = %secs, "Ignoring invalid USTOCK_API_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("USTOCK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(days) = lookup("USTOCK_EXPIRING_DAYS") {
            match days.parse::<i64>() {
                Ok(days) => self.display.expiring_days = days,
                Err(_) => warn!(value = %days, "Ignoring invalid USTOCK_EXPIRING_DAYS"),
            }
        }
    }

    /// Default config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("ustock.toml"))
    }

    /// Database file to open: the configured path, or `ustock.db` in the
    /// platform data dir (created if missing).
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoProjectDirs)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Write {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join("ustock.db"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("fr", "totooche", "ustock")
}

// =============================================================================
// Unit Tests
// =============================================================================
