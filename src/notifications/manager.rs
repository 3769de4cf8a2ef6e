//! The notification manager.
//!
//! Owns the active list and the renderer, and keeps one expiry timer per
//! notification that has a duration. Every mutation re-renders the full list
//! before returning.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use dashmap::DashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::renderer::NotificationRenderer;
use super::types::{
    DefaultDurations, Notification, NotificationId, NotificationKind, NotificationOptions,
};

struct ManagerState {
    active: Vec<Notification>,
    renderer: Box<dyn NotificationRenderer>,
    mounted: bool,
}

struct Inner {
    // Lock order: `state` before `timers`.
    state: Mutex<ManagerState>,
    timers: DashMap<NotificationId, JoinHandle<()>>,
    next_id: AtomicU64,
    durations: DefaultDurations,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(state: &mut ManagerState) {
        if !state.mounted {
            return;
        }
        let ManagerState {
            active, renderer, ..
        } = state;
        renderer.render(active);
    }

    fn remove(&self, id: NotificationId) {
        let mut state = self.lock_state();
        let before = state.active.len();
        state.active.retain(|notification| notification.id != id);
        let removed = state.active.len() != before;
        Self::render(&mut state);

        if let Some((_, timer)) = self.timers.remove(&id) {
            timer.abort();
        }

        if removed {
            tracing::debug!(id = %id, "Notification removed");
        }
    }

    /// Called by the expiry timer of `id`
    fn expire(&self, id: NotificationId) {
        let mut state = self.lock_state();
        self.timers.remove(&id);

        if let Some(position) = state.active.iter().position(|n| n.id == id) {
            state.active.remove(position);
            Self::render(&mut state);
            tracing::debug!(id = %id, "Notification expired");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for timer in self.timers.iter() {
            timer.value().abort();
        }
    }
}

/// Handle bound to a single notification that dismisses it
///
/// Holds only a weak reference, so a notification kept around by a renderer
/// does not keep the manager alive.
#[derive(Clone)]
pub struct CloseHandle {
    id: NotificationId,
    manager: Weak<Inner>,
}

impl CloseHandle {
    /// Removes the bound notification; a no-op if it is already gone
    pub fn close(&self) {
        if let Some(inner) = self.manager.upgrade() {
            inner.remove(self.id);
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[cfg(test)]
    pub(crate) fn detached(id: NotificationId) -> Self {
        Self {
            id,
            manager: Weak::new(),
        }
    }
}

impl fmt::Debug for CloseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseHandle").field("id", &self.id).finish()
    }
}

/// Queue of transient notifications with auto-expiry
///
/// Cloning is cheap and every clone drives the same active list, so the
/// composition root creates one manager and passes clones to whatever needs
/// to raise notifications.
///
/// # Example
/// ```ignore
/// let manager = NotificationManager::new(Box::new(TerminalRenderer::stderr(true)), DefaultDurations::default());
/// manager.initialize();
///
/// let id = manager.success("Task successfully created", Some("Success!"), None);
/// manager.remove(id);
/// ```
#[derive(Clone)]
pub struct NotificationManager {
    inner: Arc<Inner>,
}

impl NotificationManager {
    /// Creates a manager drawing through `renderer`
    ///
    /// # Arguments
    /// * `renderer` - Presentation layer, mounted on `initialize()`
    /// * `durations` - Expiry applied by `success`/`error`/`info`/`warning`
    pub fn new(renderer: Box<dyn NotificationRenderer>, durations: DefaultDurations) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ManagerState {
                    active: Vec::new(),
                    renderer,
                    mounted: false,
                }),
                timers: DashMap::new(),
                next_id: AtomicU64::new(1),
                durations,
            }),
        }
    }

    /// Mounts the render target
    ///
    /// Only the first call mounts; later calls do nothing. Notifications shown
    /// before this point are drawn right after mounting.
    pub fn initialize(&self) {
        let mut state = self.inner.lock_state();
        if state.mounted {
            tracing::debug!("Notification container already mounted");
            return;
        }

        state.renderer.mount();
        state.mounted = true;
        tracing::debug!(renderer = state.renderer.name(), "Notification container mounted");

        Inner::render(&mut state);
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock_state().mounted
    }

    /// Appends a notification and schedules its expiry
    ///
    /// # Arguments
    /// * `options` - Kind, title, message and duration in milliseconds;
    ///   a missing or zero duration means the notification stays until removed
    ///
    /// # Returns
    /// The id of the new notification, usable with [`remove`](Self::remove)
    pub fn show(&self, options: NotificationOptions) -> NotificationId {
        let id = NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let NotificationOptions {
            kind,
            title,
            message,
            duration,
        } = options;

        let notification = Notification {
            id,
            kind,
            title: title.unwrap_or_else(|| kind.default_title().to_string()),
            message: message.unwrap_or_default(),
            duration: duration.unwrap_or(0),
            on_close: CloseHandle {
                id,
                manager: Arc::downgrade(&self.inner),
            },
        };
        let expires_after = notification.expires_after();

        let mut state = self.inner.lock_state();
        state.active.push(notification);
        Inner::render(&mut state);

        if let Some(after) = expires_after
            && let Some(timer) = self.schedule_expiry(id, after)
        {
            self.inner.timers.insert(id, timer);
        }

        tracing::debug!(id = %id, kind = %kind, duration = ?expires_after, "Notification shown");
        id
    }

    pub fn success(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        duration: Option<u64>,
    ) -> NotificationId {
        self.show_kind(NotificationKind::Success, message.into(), title, duration)
    }

    pub fn error(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        duration: Option<u64>,
    ) -> NotificationId {
        self.show_kind(NotificationKind::Error, message.into(), title, duration)
    }

    pub fn info(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        duration: Option<u64>,
    ) -> NotificationId {
        self.show_kind(NotificationKind::Info, message.into(), title, duration)
    }

    pub fn warning(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        duration: Option<u64>,
    ) -> NotificationId {
        self.show_kind(NotificationKind::Warning, message.into(), title, duration)
    }

    /// Removes the notification with `id` and cancels its timer
    ///
    /// Removing an id that is not in the active list leaves it unchanged.
    pub fn remove(&self, id: NotificationId) {
        self.inner.remove(id);
    }

    /// Removes every notification and cancels all pending timers
    pub fn clear(&self) {
        let mut state = self.inner.lock_state();
        let cleared = state.active.len();
        state.active.clear();
        Inner::render(&mut state);

        self.inner.timers.retain(|_, timer| {
            timer.abort();
            false
        });

        tracing::debug!(cleared, "Notifications cleared");
    }

    /// Snapshot of the active list, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.lock_state().active.clone()
    }

    pub fn ids(&self) -> Vec<NotificationId> {
        self.inner
            .lock_state()
            .active
            .iter()
            .map(|notification| notification.id)
            .collect()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.inner
            .lock_state()
            .active
            .iter()
            .any(|notification| notification.id == id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock_state().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock_state().active.is_empty()
    }

    /// Number of expiry timers that have not fired or been cancelled
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.len()
    }

    fn show_kind(
        &self,
        kind: NotificationKind,
        message: String,
        title: Option<&str>,
        duration: Option<u64>,
    ) -> NotificationId {
        self.show(NotificationOptions {
            kind,
            title: Some(title.unwrap_or(kind.default_title()).to_string()),
            message: Some(message),
            duration: Some(duration.unwrap_or(self.inner.durations.for_kind(kind))),
        })
    }

    fn schedule_expiry(&self, id: NotificationId, after: Duration) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(id = %id, "No async runtime available, notification will not expire");
            return None;
        };

        let manager = Arc::downgrade(&self.inner);
        Some(runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(inner) = manager.upgrade() {
                inner.expire(id);
            }
        }))
    }
}

impl fmt::Debug for NotificationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationManager")
            .field("active", &self.len())
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}
