use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
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

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/promptgate/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("promptgate").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
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

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Both base URLs are http(s) URLs
    /// - Every timeout is non-zero
    /// - No suggestion is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_base_url("identity.base_url", &self.identity.base_url)?;
        check_base_url("pipeline.base_url", &self.pipeline.base_url)?;

        let timeouts = [
            ("timeouts.probe_seconds", self.timeouts.probe_seconds),
            ("timeouts.verify_seconds", self.timeouts.verify_seconds),
            ("timeouts.dispatch_seconds", self.timeouts.dispatch_seconds),
            ("timeouts.logout_seconds", self.timeouts.logout_seconds),
            ("timeouts.connect_seconds", self.timeouts.connect_seconds),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::ValidationError {
                message: format!("{} must be greater than zero", name),
            });
        }

        if self.pipeline.category.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "pipeline.category must not be empty".to_string(),
            });
        }

        if let Some(index) = self.suggestions.iter().position(|s| s.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("suggestions[{}] is blank", index),
            });
        }

        Ok(())
    }
}

fn check_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        message: format!("{} must be an http(s) URL, got '{}'", field, value),
    })
}
