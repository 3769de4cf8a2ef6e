//! Transient notifications (toasts).
//!
//! [`NotificationManager`] keeps the list of visible notifications, removes
//! each one when its duration runs out and redraws through a pluggable
//! [`NotificationRenderer`] after every change.

mod log_renderer;
mod manager;
mod renderer;
mod terminal_renderer;
mod types;

pub use log_renderer::LogRenderer;
pub use manager::{CloseHandle, NotificationManager};
pub use renderer::{NotificationRenderer, NullRenderer, SnapshotFrames, SnapshotRenderer};
pub use terminal_renderer::TerminalRenderer;
pub use types::{DefaultDurations, Notification, NotificationId, NotificationKind, NotificationOptions};
