//! Renderer that turns notifications into `tracing` events.

use std::collections::HashSet;

use super::renderer::NotificationRenderer;
use super::types::{Notification, NotificationId, NotificationKind};

/// Emits one log event per notification when it first becomes visible
///
/// Useful for headless runs where the log is the only output.
#[derive(Debug, Default)]
pub struct LogRenderer {
    visible: HashSet<NotificationId>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationRenderer for LogRenderer {
    fn mount(&mut self) {
        tracing::trace!("Log notification renderer mounted");
    }

    fn render(&mut self, active: &[Notification]) {
        for notification in active.iter().filter(|n| !self.visible.contains(&n.id)) {
            let id = notification.id.0;
            let title = notification.title.as_str();
            let message = notification.message.as_str();
            match notification.kind {
                NotificationKind::Error => tracing::error!(id, title, "{}", message),
                NotificationKind::Warning => tracing::warn!(id, title, "{}", message),
                NotificationKind::Success | NotificationKind::Info => {
                    tracing::info!(id, kind = %notification.kind, title, "{}", message)
                }
            }
        }
        self.visible = active.iter().map(|n| n.id).collect();
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::manager::CloseHandle;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn notification(id: u64, kind: NotificationKind, title: &str, message: &str) -> Notification {
        Notification {
            id: NotificationId(id),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            duration: 5000,
            on_close: CloseHandle::detached(NotificationId(id)),
        }
    }

    /// Renders each frame under a subscriber that writes plain text to a buffer
    fn capture(frames: &[Vec<Notification>]) -> Vec<String> {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let mut renderer = LogRenderer::new();
        tracing::subscriber::with_default(subscriber, || {
            for frame in frames {
                renderer.render(frame);
            }
        });
        log.lines()
    }

    #[test]
    fn test_tracks_visible_notifications() {
        let mut renderer = LogRenderer::new();
        let notification = Notification {
            id: NotificationId(1),
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: "Internal server error".to_string(),
            duration: 5000,
            on_close: CloseHandle::detached(NotificationId(1)),
        };

        renderer.render(std::slice::from_ref(&notification));
        assert!(renderer.visible.contains(&NotificationId(1)));

        renderer.render(&[]);
        assert!(renderer.visible.is_empty());
    }

    #[test]
    fn test_emits_one_event_per_new_notification() {
        let failed = notification(1, NotificationKind::Error, "Error", "Internal server error");

        let lines = capture(&[vec![failed.clone()], vec![failed]]);

        assert_eq!(lines.len(), 1, "unexpected log output: {:?}", lines);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("Internal server error"));
        assert!(lines[0].contains("title=\"Error\""));
    }

    #[test]
    fn test_event_level_follows_kind() {
        let frame = vec![
            notification(1, NotificationKind::Success, "Success!", "Task successfully created"),
            notification(2, NotificationKind::Warning, "Warning", "Slow response"),
            notification(3, NotificationKind::Info, "Information", "Syncing"),
        ];

        let lines = capture(&[frame]);

        assert_eq!(lines.len(), 3, "unexpected log output: {:?}", lines);
        assert!(lines[0].contains("INFO") && lines[0].contains("kind=success"));
        assert!(lines[1].contains("WARN") && lines[1].contains("Slow response"));
        assert!(lines[2].contains("INFO") && lines[2].contains("kind=info"));
    }
}
