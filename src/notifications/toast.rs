//! Transient, self-dismissing status messages.
//!
//! Every toast owns one timer task. The entry keeps the task's abort handle,
//! so removing a toast by any path cancels its timer, and a timer that fires
//! for a toast already removed finds nothing to do.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::constants::{DEFAULT_TOAST_DURATION_MS, EVENT_CHANNEL_CAPACITY};

/// Deadline used when `now + duration` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Opaque identifier returned by [`ToastQueue::add_toast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A toast to display. `duration` falls back to the queue default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub duration: Option<Duration>,
}

impl ToastRequest {
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            duration: None,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title, message)
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub duration: Duration,
    /// Capped far in the future for durations too large to represent.
    pub expires_at: Instant,
}

impl Toast {
    /// Time left before the toast dismisses itself.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Why a toast left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    Expired,
    Dismissed,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Added(ToastId),
    Removed { id: ToastId, reason: RemovalReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastSettings {
    pub default_duration: Duration,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        }
    }
}

struct ToastEntry {
    toast: Toast,
    timer: Option<AbortHandle>,
}

impl Drop for ToastEntry {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[derive(Default)]
struct ToastState {
    entries: Vec<ToastEntry>,
}

impl ToastState {
    fn position(&self, id: ToastId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.toast.id == id)
    }

    fn toasts(&self) -> Vec<Toast> {
        self.entries.iter().map(|entry| entry.toast.clone()).collect()
    }
}

struct Shared {
    state: Mutex<ToastState>,
    snapshots: watch::Sender<Vec<Toast>>,
    events: broadcast::Sender<ToastEvent>,
    settings: ToastSettings,
}

/// Owned store of visible toasts. Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct ToastQueue {
    shared: Arc<Shared>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_settings(ToastSettings::default())
    }

    pub fn with_settings(settings: ToastSettings) -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ToastState::default()),
                snapshots,
                events,
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &ToastSettings {
        &self.shared.settings
    }

    /// Append a toast and schedule its expiry.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn add_toast(&self, request: ToastRequest) -> ToastId {
        let id = ToastId::new();
        let duration = request.duration.unwrap_or(self.shared.settings.default_duration);

        debug!("Adding {:?} toast {} for {:?}: {}", request.kind, id, duration, request.title);

        let now = Instant::now();
        let expires_at = now.checked_add(duration).unwrap_or(now + FAR_FUTURE);
        let toast = Toast {
            id,
            kind: request.kind,
            title: request.title,
            message: request.message,
            duration,
            expires_at,
        };

        {
            let mut state = self.lock();
            state.entries.push(ToastEntry { toast, timer: None });
            self.publish(&state);
        }
        self.emit(ToastEvent::Added(id));

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            if let Some(shared) = weak.upgrade() {
                ToastQueue { shared }.take(id, RemovalReason::Expired);
            }
        });

        let mut state = self.lock();
        match state.position(id) {
            Some(index) => state.entries[index].timer = Some(handle.abort_handle()),
            // Removed before the timer could be attached.
            None => handle.abort(),
        }

        id
    }

    /// Dismiss a toast. Unknown or already removed ids are ignored.
    pub fn remove_toast(&self, id: ToastId) {
        if !self.take(id, RemovalReason::Dismissed) {
            debug!("remove_toast: {} is not visible", id);
        }
    }

    /// Remove every toast and cancel their timers.
    pub fn clear_toasts(&self) {
        let removed: Vec<ToastId> = {
            let mut state = self.lock();
            let drained: Vec<ToastEntry> = state.entries.drain(..).collect();
            self.publish(&state);
            drained.iter().map(|entry| entry.toast.id).collect()
        };

        if !removed.is_empty() {
            info!("Cleared {} toast(s)", removed.len());
        }
        for id in removed {
            self.emit(ToastEvent::Removed {
                id,
                reason: RemovalReason::Cleared,
            });
        }
    }

    /// Visible toasts in insertion order.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().toasts()
    }

    pub fn get(&self, id: ToastId) -> Option<Toast> {
        let state = self.lock();
        state.position(id).map(|index| state.entries[index].toast.clone())
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.lock().position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.shared.snapshots.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<ToastEvent> {
        self.shared.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, state: &ToastState) {
        self.shared.snapshots.send_replace(state.toasts());
    }

    fn emit(&self, event: ToastEvent) {
        let _ = self.shared.events.send(event);
    }

    /// Remove by id. Both the timer and user dismissal go through here, so
    /// whichever comes second sees the entry gone and does nothing.
    fn take(&self, id: ToastId, reason: RemovalReason) -> bool {
        {
            let mut state = self.lock();
            let Some(index) = state.position(id) else {
                return false;
            };
            let mut entry = state.entries.remove(index);
            if reason == RemovalReason::Expired {
                // Running inside the timer task itself.
                entry.timer = None;
            }
            self.publish(&state);
        }

        debug!("Toast {} removed ({:?})", id, reason);
        self.emit(ToastEvent::Removed { id, reason });
        true
    }
}
