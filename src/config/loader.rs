use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{CliSource, Config};

/// Errors that can occur when loading or persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/h2mm-tui/config.toml` on Unix, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config directory is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("h2mm-tui").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Config::default()` so a fresh install starts
    /// with the onboarding wizard instead of an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Persists the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError {
            message: format!("Failed to serialize config: {}", e),
        })?;
        fs::write(path, content).map_err(write_err)
    }

    /// Validates the configuration: a custom CLI source requires a path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cli.source == CliSource::Custom {
            let missing = self
                .cli
                .custom_path
                .as_ref()
                .map_or(true, |p| p.as_os_str().is_empty());
            if missing {
                return Err(ConfigError::ValidationError {
                    message: "CLI source is 'custom' but no custom_path is configured".to_string(),
                });
            }
        }
        Ok(())
    }
}
