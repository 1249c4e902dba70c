//! Configuration loading and environment variable handling

use crate::domains::utils::split_list;
use crate::domains::ErrtrackConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "ERRTRACK".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML or JSON file with environment overrides.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<ErrtrackConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            self.from_json_str(&content)
        } else {
            self.from_yaml_str(&content)
        }
    }

    /// Load configuration from a YAML document with environment overrides
    pub fn from_yaml_str(&self, content: &str) -> ConfigResult<ErrtrackConfig> {
        let config: ErrtrackConfig = if content.trim().is_empty() {
            ErrtrackConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        self.finish(config)
    }

    /// Load configuration from a JSON document with environment overrides
    pub fn from_json_str(&self, content: &str) -> ConfigResult<ErrtrackConfig> {
        let config: ErrtrackConfig = serde_json::from_str(content)?;
        self.finish(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<ErrtrackConfig> {
        self.finish(ErrtrackConfig::default())
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<ErrtrackConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn finish(&self, mut config: ErrtrackConfig) -> ConfigResult<ErrtrackConfig> {
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut ErrtrackConfig) -> ConfigResult<()> {
        self.apply_error_tracking_overrides(&mut config.error_tracking)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply error tracking config overrides
    fn apply_error_tracking_overrides(
        &self,
        config: &mut crate::domains::error_tracking::ErrorTrackingConfig,
    ) -> ConfigResult<()> {
        if let Some(headers) = self.get_env_var("MASK_HEADERS")? {
            config.mask_headers = split_list(&headers);
        }

        if let Some(kinds) = self.get_env_var("MAP_TO_INTERNAL_ERROR")? {
            config.map_to_internal_error = split_list(&kinds);
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Some(log_level) = self.get_env_var("LOG_LEVEL")? {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Some(format) = self.get_env_var("LOG_FORMAT")? {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix; unset is `None`, non-unicode is an error
    fn get_env_var(&self, name: &str) -> ConfigResult<Option<String>> {
        let key = format!("{}_{}", self.prefix, name);
        match std::env::var(&key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::EnvError(format!("Invalid {}: {}", key, e))),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
