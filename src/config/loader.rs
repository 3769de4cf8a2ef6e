//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `default.toml`
//! 3. `{environment}.toml`
//! 4. `local.toml`
//! 5. `TASK_PLANNER_*` environment variables
//!
//! All files in the configuration directory are optional. A file passed
//! explicitly (`TASK_PLANNER_CONFIG_FILE` or `--config`) replaces the
//! directory layers and must exist.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "TASK_PLANNER_CONFIG_DIR";

/// Environment variable for a single configuration file
pub const CONFIG_FILE_ENV: &str = "TASK_PLANNER_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "TASK_PLANNER";

const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from files and environment variables
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `TASK_PLANNER_CONFIG_DIR`, `TASK_PLANNER_CONFIG_FILE`
    /// and `TASK_PLANNER_APP_ENV`
    ///
    /// # Errors
    ///
    /// Returns an error if both `TASK_PLANNER_CONFIG_DIR` and
    /// `TASK_PLANNER_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set. Use {} for layered configuration or {} for a single configuration file.",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV, CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single file instead of the directory layers
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load, deserialize and validate the settings
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        // TASK_PLANNER_API__BASE_URL -> api.base_url
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let layers = [
            self.config_dir.join("default.toml"),
            self.config_dir.join(self.environment.file_name()),
            self.config_dir.join("local.toml"),
        ];

        layers
            .iter()
            .try_fold(builder, |builder, path| Self::add_file_source(builder, path, false))
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        let name = path
            .to_str()
            .ok_or_else(|| ConfigError::ParseError(format!("Non UTF-8 path: {}", path.display())))?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::settings::RendererKind;
    use std::fs;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use tempfile::TempDir;

    // Tests that touch process environment variables run one at a time
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
        ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets environment variables and restores them on drop
    pub(crate) struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts from a clean slate for every loader variable
        pub(crate) fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            let loader_vars: Vec<String> = std::env::vars()
                .map(|(key, _)| key)
                .filter(|key| key.starts_with("TASK_PLANNER_"))
                .collect();
            for key in loader_vars {
                guard.remove(&key);
            }
            guard
        }

        pub(crate) fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_new_uses_defaults() {
        let _lock = lock_env();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file().is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_new_reads_locations_from_env() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_FILE_ENV, "/etc/task-planner.toml");
        env.set(AppEnvironment::ENV_VAR, "prod");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_file(), Some(Path::new("/etc/task-planner.toml")));
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_dir_and_file_are_mutually_exclusive() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains(CONFIG_DIR_ENV));
                assert!(msg.contains(CONFIG_FILE_ENV));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_directory_yields_defaults() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_layer_precedence() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            (
                "default.toml",
                r#"
[api]
base_url = "http://default:8000"
request_timeout_ms = 1000

[notifications]
renderer = "none"
"#,
            ),
            (
                "test.toml",
                r#"
[api]
base_url = "http://test:8000"
"#,
            ),
            (
                "local.toml",
                r#"
[notifications.durations]
success = 1500
"#,
            ),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "test");
        env.set("TASK_PLANNER_API__REQUEST_TIMEOUT_MS", "2500");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");

        assert_eq!(settings.api.base_url, "http://test:8000");
        assert_eq!(settings.api.request_timeout_ms, 2500);
        assert_eq!(settings.notifications.renderer, RendererKind::None);
        assert_eq!(settings.notifications.durations.success, 1500);
        assert_eq!(settings.notifications.durations.error, 5000);
    }

    #[test]
    fn test_other_environment_file_is_ignored() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "production.toml",
            r#"
[api]
base_url = "https://tasks.example.com"
"#,
        )]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_single_file_mode_skips_directory() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            ("default.toml", "[api]\nbase_url = \"http://layered:8000\"\n"),
            ("custom.toml", "[api]\nbase_url = \"http://single:8000\"\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("custom.toml"))
            .load()
            .expect("Should load");
        assert_eq!(settings.api.base_url, "http://single:8000");
    }

    #[test]
    fn test_missing_explicit_file() {
        let _lock = lock_env();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);
        let missing = temp_dir.path().join("missing.toml");

        let result = ConfigLoader::new().unwrap().with_config_file(&missing).load();
        match result {
            Err(ConfigError::FileNotFound(path)) => assert!(path.contains("missing.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", "[api]\nbase_url = \"ftp://tasks\"\n")]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "api.base_url"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let _lock = lock_env();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", "[api\nbase_url = ")]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        assert!(ConfigLoader::new().unwrap().load().is_err());
    }
}
