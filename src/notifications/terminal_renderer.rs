//! Terminal renderer.
//!
//! A terminal cannot take back lines it already printed, so this renderer
//! remembers which notifications are on screen and only writes the ones that
//! appear in a new frame.

use std::collections::HashSet;
use std::io::{self, IsTerminal, Write};

use super::renderer::NotificationRenderer;
use super::types::{Notification, NotificationId, NotificationKind};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Writes notifications as single lines to a terminal stream
pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    colored: bool,
    visible: HashSet<NotificationId>,
}

impl TerminalRenderer {
    /// Renderer writing to stderr
    ///
    /// Colors are only used when `colored` is set and stderr is a TTY.
    pub fn stderr(colored: bool) -> Self {
        let use_ansi = colored && io::stderr().is_terminal();
        Self::with_writer(io::stderr(), use_ansi)
    }

    pub fn with_writer(out: impl Write + Send + 'static, colored: bool) -> Self {
        Self {
            out: Box::new(out),
            colored,
            visible: HashSet::new(),
        }
    }

    fn format_line(&self, notification: &Notification) -> String {
        let marker = marker(notification.kind);
        let body = if notification.message.is_empty() {
            notification.title.clone()
        } else {
            format!("{}: {}", notification.title, notification.message)
        };

        if self.colored {
            format!("{}{}[{}]{} {}", color(notification.kind), BOLD, marker, RESET, body)
        } else {
            format!("[{}] {}", marker, body)
        }
    }
}

fn marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
        NotificationKind::Warning => "warn",
    }
}

fn color(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "\x1b[32m",
        NotificationKind::Error => "\x1b[31m",
        NotificationKind::Info => "\x1b[36m",
        NotificationKind::Warning => "\x1b[33m",
    }
}

impl NotificationRenderer for TerminalRenderer {
    fn render(&mut self, active: &[Notification]) {
        let mut lines = Vec::new();
        for notification in active {
            if !self.visible.contains(&notification.id) {
                lines.push(self.format_line(notification));
            }
        }

        // Dismissed notifications leave the visible set so the set never
        // outgrows the active list.
        self.visible = active.iter().map(|n| n.id).collect();

        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                tracing::debug!(error = %e, "Failed to write notification to terminal");
                return;
            }
        }
        if let Err(e) = self.out.flush() {
            tracing::debug!(error = %e, "Failed to flush terminal notifications");
        }
    }

    fn name(&self) -> &'static str {
        "terminal"
    }
}
