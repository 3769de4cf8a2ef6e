//! Configuration validation logic
//!
//! Checks run after deserialization so that a bad value is reported with
//! the dotted key it came from.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{ApiConfig, FileSettings, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ApiConfig {
    /// Validate API client configuration
    ///
    /// # Validation Rules
    /// - Base URL must be an absolute `http` or `https` URL
    /// - Both timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            field: "api.base_url".to_string(),
            message: format!("Invalid base URL '{}': {}", self.base_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                field: "api.base_url".to_string(),
                message: format!(
                    "Unsupported scheme '{}'. The base URL must use http or https.",
                    url.scheme()
                ),
            });
        }

        if url.cannot_be_a_base() {
            return Err(ConfigError::validation(
                "api.base_url",
                "The base URL cannot be used as a base for request paths.",
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::validation(
                "api.request_timeout_ms",
                "Request timeout must be greater than 0 milliseconds.",
            ));
        }

        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::validation(
                "api.connect_timeout_ms",
                "Connect timeout must be greater than 0 milliseconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings, returning the first error
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
