use clap::Parser;

use task_planner::cli::{self, Cli};
use task_planner::config::RendererKind;
use task_planner::error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = task_planner::pkg_version(),
        base_url = %settings.api.base_url,
        "Starting task-planner"
    );

    let renderer = settings.notifications.renderer;
    match cli::execute_command(&cli, settings).await {
        Ok(()) => Ok(()),
        // Already shown as an error notification
        Err(AppError::Api { .. }) if renderer != RendererKind::None => std::process::exit(1),
        Err(e) => Err(e.into()),
    }
}
