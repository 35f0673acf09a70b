//! Configuration file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tabula_core::DEFAULT_PAGE_SIZE;
use tabula_database::ConnectionSettings;
use tabula_error::ConfigError;

/// Top-level configuration loaded from TOML.
///
/// ```toml
/// [connection]
/// host = "sql01"
/// username = "reader"
///
/// [browse]
/// page_size = 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabulaConfig {
    /// How to reach the server
    #[serde(default)]
    pub connection: ConnectionSettings,
    /// Browsing preferences
    #[serde(default)]
    pub browse: BrowseSettings,
}

/// Browsing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseSettings {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl TabulaConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or `page_size` is 0.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;
        if config.browse.page_size == 0 {
            return Err(ConfigError::new("browse.page_size must be at least 1"));
        }
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Loads `explicit` if given; otherwise the default file if it exists;
    /// otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file that should be read cannot be read or
    /// parsed.
    #[tracing::instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading default configuration");
                Self::from_file(path)
            }
            _ => {
                tracing::debug!("No configuration file; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/tabula/tabula.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tabula").join("tabula.toml"))
    }
}
