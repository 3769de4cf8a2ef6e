//! Renderer abstraction for the notification manager.
//!
//! The manager never draws anything itself. After every mutation it hands
//! the complete active list to a [`NotificationRenderer`], which is free to
//! redraw everything or to work out what changed for its own medium.

use std::sync::{Arc, Mutex, PoisonError};

use super::types::Notification;

/// Presentation layer fed by the notification manager
///
/// Implementations must be `Send` because the manager may be driven from
/// expiry timers running on the async runtime.
///
/// # Example Implementation
/// ```ignore
/// struct StdoutRenderer;
///
/// impl NotificationRenderer for StdoutRenderer {
///     fn render(&mut self, active: &[Notification]) {
///         for notification in active {
///             println!("{}: {}", notification.title, notification.message);
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "stdout"
///     }
/// }
/// ```
pub trait NotificationRenderer: Send {
    /// Prepares the render target (the notification container)
    ///
    /// Called exactly once, by the first `initialize()` on the manager.
    fn mount(&mut self) {}

    /// Synchronises the presentation with the current active list
    ///
    /// Runs while the manager holds its lock, so implementations must not
    /// call back into the manager. That includes [`Notification::close`],
    /// which would deadlock here.
    ///
    /// # Arguments
    /// * `active` - every visible notification, oldest first
    fn render(&mut self, active: &[Notification]);

    /// Returns the renderer name for logging/debugging
    fn name(&self) -> &'static str;
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl NotificationRenderer for NullRenderer {
    fn render(&mut self, _active: &[Notification]) {}

    fn name(&self) -> &'static str {
        "none"
    }
}

#[derive(Debug, Default)]
struct SnapshotLog {
    mounts: usize,
    frames: Vec<Vec<Notification>>,
}

/// Renderer that records every frame it is asked to draw
///
/// The recorded frames are read through the [`SnapshotFrames`] handle
/// returned by [`SnapshotRenderer::new`], which stays usable after the
/// renderer itself has been moved into a manager.
#[derive(Debug)]
pub struct SnapshotRenderer {
    log: Arc<Mutex<SnapshotLog>>,
}

impl SnapshotRenderer {
    pub fn new() -> (Self, SnapshotFrames) {
        let log = Arc::new(Mutex::new(SnapshotLog::default()));
        (
            Self {
                log: Arc::clone(&log),
            },
            SnapshotFrames { log },
        )
    }
}

impl NotificationRenderer for SnapshotRenderer {
    fn mount(&mut self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mounts += 1;
    }

    fn render(&mut self, active: &[Notification]) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frames
            .push(active.to_vec());
    }

    fn name(&self) -> &'static str {
        "snapshot"
    }
}

/// Read side of a [`SnapshotRenderer`]
#[derive(Debug, Clone)]
pub struct SnapshotFrames {
    log: Arc<Mutex<SnapshotLog>>,
}

impl SnapshotFrames {
    /// How many times the render target was mounted
    pub fn mounts(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).mounts
    }

    /// Every frame drawn so far, in order
    pub fn frames(&self) -> Vec<Vec<Notification>> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frames
            .clone()
    }

    pub fn frame_count(&self) -> usize {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frames
            .len()
    }

    /// The most recent frame, i.e. what is on screen right now
    pub fn last(&self) -> Option<Vec<Notification>> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frames
            .last()
            .cloned()
    }
}
