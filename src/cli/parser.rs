//! CLI argument parsing with clap
//!
//! This module defines the command-line interface: global configuration
//! flags and one subcommand per tasks API operation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config;

/// Command-line client for the AI Task Planner API
#[derive(Parser, Debug)]
#[command(name = "task-planner")]
#[command(about = "Command-line client for the AI Task Planner API")]
#[command(long_about = "
task-planner manages tasks on an AI Task Planner backend. Results are
printed to stdout; the outcome of every change is shown as a short
notification on stderr.

EXAMPLES:
    # List the first page of tasks
    task-planner list

    # List pending tasks only, 20 at a time
    task-planner list --pending --limit 20

    # Create a task
    task-planner create --title \"Write report\" --description \"Q3 numbers\"

    # Mark task 7 as done
    task-planner complete 7

    # Talk to another backend
    task-planner --base-url http://tasks.internal:8000 list

    # Show the effective configuration
    task-planner --env production check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files in the
    /// configuration directory. The file must exist and be readable.
    ///
    /// Example: --config ~/.config/task-planner.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` is layered over `default.toml`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Sets the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Base URL of the tasks backend
    ///
    /// Overrides `api.base_url` from configuration.
    #[arg(long, value_name = "URL", value_parser = super::validation::validate_base_url)]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List tasks, newest first
    ///
    /// Examples:
    ///   task-planner list                      # First 100 tasks
    ///   task-planner list --skip 100           # Next page
    ///   task-planner list --completed          # Finished tasks only
    List {
        /// Number of tasks to skip
        #[arg(long, value_name = "N", default_value_t = 0)]
        skip: u32,

        /// Maximum number of tasks to return (1-1000)
        #[arg(short, long, value_name = "N", default_value_t = 100, value_parser = super::validation::validate_limit)]
        limit: u32,

        /// Only completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only tasks that are not completed
        #[arg(long)]
        pending: bool,
    },

    /// Show one task
    Show {
        /// Task id
        #[arg(value_parser = super::validation::validate_task_id)]
        id: i32,
    },

    /// Create a task
    Create {
        /// Title (1-255 characters)
        #[arg(short, long, value_parser = super::validation::validate_title)]
        title: String,

        /// Longer description (up to 2000 characters)
        #[arg(short, long)]
        description: Option<String>,

        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },

    /// Change the title, description or status of a task
    ///
    /// Only the given fields are changed. An empty description clears it.
    Update {
        /// Task id
        #[arg(value_parser = super::validation::validate_task_id)]
        id: i32,

        /// New title
        #[arg(short, long, value_parser = super::validation::validate_title)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New completion status
        #[arg(long, value_name = "BOOL")]
        completed: Option<bool>,
    },

    /// Delete a task
    Delete {
        /// Task id
        #[arg(value_parser = super::validation::validate_task_id)]
        id: i32,
    },

    /// Mark a task as completed
    Complete {
        /// Task id
        #[arg(value_parser = super::validation::validate_task_id)]
        id: i32,
    },

    /// Validate and print the effective configuration, then exit
    Check,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => config::Environment::Development,
            Environment::Test => config::Environment::Test,
            Environment::Staging => config::Environment::Staging,
            Environment::Production => config::Environment::Production,
        }
    }
}

impl Cli {
    /// Command to run, `list` with default paging when none was given
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            skip: 0,
            limit: 100,
            completed: false,
            pending: false,
        })
    }

    /// Checks argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Update {
            title: None,
            description: None,
            completed: None,
            ..
        }) = self.command
        {
            return Err(
                "Nothing to update. Pass at least one of --title, --description or --completed"
                    .to_string(),
            );
        }

        Ok(())
    }
}
