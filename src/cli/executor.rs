//! Command executor for dispatching CLI commands
//!
//! Main entry point for running a command once arguments are parsed and
//! configuration is loaded.

use super::handlers::{CheckCommandHandler, TaskCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::external::tasks::{NewTask, TaskQuery, TaskUpdate};
use crate::state::AppState;

/// Execute the parsed command with the merged settings
///
/// # Errors
/// Returns argument validation errors, configuration errors and the
/// errors of the tasks API client.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    let command = cli.effective_command();
    if command == Commands::Check {
        return CheckCommandHandler::new(settings).execute();
    }

    let state = AppState::new(&settings)?;
    tracing::debug!(base_url = %state.tasks.base_url(), ?command, "Executing command");

    let handler = TaskCommandHandler::new(state);
    match command {
        Commands::List {
            skip,
            limit,
            completed,
            pending,
        } => handler.list(list_query(skip, limit, completed, pending)).await,
        Commands::Show { id } => handler.show(id).await,
        Commands::Create {
            title,
            description,
            completed,
        } => {
            let mut task = NewTask::new(title).completed(completed);
            task.description = description;
            handler.create(task).await
        }
        Commands::Update {
            id,
            title,
            description,
            completed,
        } => {
            let update = TaskUpdate {
                title,
                description,
                is_completed: completed,
            };
            handler.update(id, update).await
        }
        Commands::Delete { id } => handler.delete(id).await,
        Commands::Complete { id } => handler.complete(id).await,
        Commands::Check => Ok(()),
    }
}

fn list_query(skip: u32, limit: u32, completed: bool, pending: bool) -> TaskQuery {
    let completed = match (completed, pending) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    TaskQuery {
        skip,
        limit,
        completed,
    }
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })
}
