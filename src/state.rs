//! Application state shared by command handlers.
//!
//! Builds the renderer chosen in settings, the notification manager and
//! the task API client holding a handle to that manager.

use crate::config::{NotificationSettings, RendererKind, Settings};
use crate::error::AppResult;
use crate::external::tasks::TaskApiClient;
use crate::notifications::{
    LogRenderer, NotificationManager, NotificationRenderer, NullRenderer, TerminalRenderer,
};

/// Shared services for one run of the client
///
/// Cloning is cheap: the manager and the HTTP client are reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    pub notifications: NotificationManager,
    pub tasks: TaskApiClient,
}

impl AppState {
    /// Creates the state from settings, with the renderer they select
    pub fn new(settings: &Settings) -> AppResult<Self> {
        Self::with_renderer(settings, renderer_for(&settings.notifications))
    }

    /// Creates the state around a caller-provided renderer
    ///
    /// The manager is initialized before the client is handed its handle.
    pub fn with_renderer(
        settings: &Settings,
        renderer: Box<dyn NotificationRenderer>,
    ) -> AppResult<Self> {
        let notifications = NotificationManager::new(
            renderer,
            settings.notifications.durations.to_default_durations(),
        );
        notifications.initialize();

        let tasks = TaskApiClient::new(&settings.api, notifications.clone())?;

        Ok(Self {
            notifications,
            tasks,
        })
    }
}

/// Renderer selected by `notifications.renderer`
pub fn renderer_for(settings: &NotificationSettings) -> Box<dyn NotificationRenderer> {
    match settings.renderer {
        RendererKind::Terminal => Box::new(TerminalRenderer::stderr(settings.colored)),
        RendererKind::Log => Box::new(LogRenderer::new()),
        RendererKind::None => Box::new(NullRenderer),
    }
}
