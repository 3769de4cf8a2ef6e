//! Check command handler
//!
//! Validates the merged configuration and prints it.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> AppResult<()> {
        print!("{}", self.report()?);
        Ok(())
    }

    /// Validation summary followed by the effective settings as JSON
    pub fn report(&self) -> AppResult<String> {
        self.config.validate()?;

        let settings = serde_json::to_string_pretty(&self.config)
            .map_err(|e| AppError::Internal { source: e.into() })?;

        Ok(format!(
            "✓ Configuration is valid\n\
             ✓ API base URL: {}\n\
             ✓ Notifications: {:?} renderer\n\
             ✓ Log level: {}\n\
             {}\n",
            self.config.api.base_url,
            self.config.notifications.renderer,
            self.config.logger.level,
            settings
        ))
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_handler_new() {
        let config = Settings::default();
        let handler = CheckCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[test]
    fn test_report_lists_effective_values() {
        let report = CheckCommandHandler::new(Settings::default())
            .report()
            .expect("defaults are valid");

        assert!(report.starts_with("✓ Configuration is valid"));
        assert!(report.contains("API base URL: http://localhost:8000"));
        assert!(report.contains("\"request_timeout_ms\": 10000"));
    }

    #[test]
    fn test_report_rejects_invalid_config() {
        let mut config = Settings::default();
        config.api.base_url = "not a url".to_string();

        let result = CheckCommandHandler::new(config).report();
        assert!(matches!(result, Err(AppError::Configuration { ref key, .. }) if key == "api.base_url"));
    }
}
