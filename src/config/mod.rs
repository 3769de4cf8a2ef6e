//! Configuration management
//!
//! Settings are read from layered TOML files and `TASK_PLANNER_*`
//! environment variables. See [`loader`] for the precedence rules.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{
    ApiConfig, ApplicationConfig, ConsoleSettings, DurationSettings, FileSettings, LoggerSettings,
    NotificationSettings, RendererKind, Settings,
};
