//! Notification record types.
//!
//! A [`Notification`] is the value the manager keeps in its active list and
//! hands to renderers. [`NotificationOptions`] is what callers pass to
//! [`NotificationManager::show`](super::NotificationManager::show).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::manager::CloseHandle;

/// Identifier assigned to a notification when it is shown.
///
/// Ids come from a per-manager counter starting at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl NotificationKind {
    /// Title used when the caller does not supply one
    pub fn default_title(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
            NotificationKind::Info => "Information",
            NotificationKind::Warning => "Warning",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auto-expiry durations (milliseconds) applied by the kind-specific helpers
/// such as [`NotificationManager::success`](super::NotificationManager::success).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultDurations {
    pub success: u64,
    pub error: u64,
    pub info: u64,
    pub warning: u64,
}

impl DefaultDurations {
    pub fn for_kind(&self, kind: NotificationKind) -> u64 {
        match kind {
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
            NotificationKind::Info => self.info,
            NotificationKind::Warning => self.warning,
        }
    }
}

impl Default for DefaultDurations {
    fn default() -> Self {
        Self {
            success: 3000,
            error: 5000,
            info: 3000,
            warning: 4000,
        }
    }
}

/// Caller-supplied description of a notification to show.
///
/// Every field is optional in spirit: a missing title falls back to the
/// kind's default, a missing message renders as empty text and a missing
/// (or zero) duration keeps the notification until it is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOptions {
    #[serde(default, rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Milliseconds until auto-removal
    #[serde(default)]
    pub duration: Option<u64>,
}

impl NotificationOptions {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn duration_ms(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// An entry of the active list
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Milliseconds until auto-removal, `0` for never
    pub duration: u64,
    #[serde(skip)]
    pub on_close: CloseHandle,
}

impl Notification {
    /// Time after which the notification removes itself, if any
    pub fn expires_after(&self) -> Option<Duration> {
        (self.duration > 0).then(|| Duration::from_millis(self.duration))
    }

    /// Dismiss this notification, as a user clicking its close button would
    pub fn close(&self) {
        self.on_close.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titles() {
        assert_eq!(NotificationKind::Success.default_title(), "Success");
        assert_eq!(NotificationKind::Error.default_title(), "Error");
        assert_eq!(NotificationKind::Info.default_title(), "Information");
        assert_eq!(NotificationKind::Warning.default_title(), "Warning");
    }

    #[test]
    fn test_default_durations() {
        let durations = DefaultDurations::default();
        assert_eq!(durations.for_kind(NotificationKind::Success), 3000);
        assert_eq!(durations.for_kind(NotificationKind::Info), 3000);
        assert_eq!(durations.for_kind(NotificationKind::Warning), 4000);
        assert_eq!(durations.for_kind(NotificationKind::Error), 5000);
    }

    #[test]
    fn test_options_builder() {
        let options = NotificationOptions::new(NotificationKind::Warning)
            .title("Heads up")
            .message("Disk almost full")
            .duration_ms(1500);

        assert_eq!(options.kind, NotificationKind::Warning);
        assert_eq!(options.title.as_deref(), Some("Heads up"));
        assert_eq!(options.message.as_deref(), Some("Disk almost full"));
        assert_eq!(options.duration, Some(1500));
    }

    #[test]
    fn test_options_deserialize_with_missing_fields() {
        let options: NotificationOptions =
            serde_json::from_str(r#"{"type": "error"}"#).expect("options should parse");

        assert_eq!(options.kind, NotificationKind::Error);
        assert!(options.title.is_none());
        assert!(options.message.is_none());
        assert!(options.duration.is_none());
    }
}
