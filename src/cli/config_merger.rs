//! Configuration merger for CLI arguments and config files
//!
//! Global flags override values loaded from files and environment
//! variables.

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration the way the CLI asks for it
    ///
    /// `--config` replaces the layered directory files and `--env` replaces
    /// `TASK_PLANNER_APP_ENV`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Self::new(Self::loader_for(cli)?.load()?))
    }

    fn loader_for(cli: &Cli) -> Result<ConfigLoader, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }

        Ok(loader)
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(ref base_url) = cli.base_url {
            config.api.base_url = base_url.clone();
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment as AppEnvironment;
    use crate::config::loader::tests::{EnvGuard, lock_env};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .expect("merge should succeed")
    }

    #[test]
    fn test_configuration_merger_new() {
        let merger = ConfigurationMerger::new(Settings::default());
        assert_eq!(merger.config(), &Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet_set_log_level() {
        assert_eq!(merge(&["task-planner", "--verbose", "list"]).logger.level, "debug");
        assert_eq!(merge(&["task-planner", "--quiet", "list"]).logger.level, "error");
        assert_eq!(merge(&["task-planner", "list"]).logger.level, "warn");
    }

    #[test]
    fn test_base_url_override() {
        let settings = merge(&["task-planner", "--base-url", "http://10.0.0.5:9000", "list"]);
        assert_eq!(settings.api.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_merge_validates_result() {
        let mut base = Settings::default();
        base.api.request_timeout_ms = 0;
        let cli = Cli::try_parse_from(["task-planner", "check"]).unwrap();

        let result = ConfigurationMerger::new(base).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_from_cli_reads_config_file_and_env() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("planner.toml");
        fs::write(&file, "[api]\nbase_url = \"http://from-file:8000\"\n").unwrap();
        env.set("TASK_PLANNER_NOTIFICATIONS__RENDERER", "log");

        let cli = Cli::try_parse_from([
            "task-planner",
            "--config",
            file.to_str().unwrap(),
            "--env",
            "test",
            "check",
        ])
        .unwrap();

        let loader = ConfigurationMerger::loader_for(&cli).unwrap();
        assert_eq!(loader.environment(), AppEnvironment::Test);

        let merger = ConfigurationMerger::from_cli(&cli).expect("should load");
        assert_eq!(merger.config().api.base_url, "http://from-file:8000");
        assert_eq!(
            merger.config().notifications.renderer,
            crate::config::RendererKind::Log
        );
    }
}
