//! Queued confirmation and alert dialogs.
//!
//! [`ModalQueue::show_modal`] enqueues a dialog and hands back a
//! [`PendingModal`], a future that resolves once the user confirms, cancels,
//! or the dialog is closed programmatically. The renderer never mutates the
//! queue directly: it reads [`ModalSnapshot`]s and reports user input through
//! [`ModalQueue::confirm`] and [`ModalQueue::cancel`].
//!
//! Each request resolves exactly once. Removal from the queue and resolution of
//! the pending future happen under the same lock, so an observer never sees a
//! resolved request still queued.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::task::{Context, Poll};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_CANCEL_LABEL, DEFAULT_CONFIRM_LABEL, DEFAULT_MODAL_ENTRY_DELAY_MS, EVENT_CHANNEL_CAPACITY,
    MODAL_BUSY_LABEL,
};

/// Opaque identifier assigned to a modal when it is enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalId(Uuid);

impl ModalId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal-{}", self.0.simple())
    }
}

/// Presentational flavour of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    Confirm,
    Warning,
    Error,
    Info,
}

/// Styling of the confirm button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmStyle {
    #[default]
    Default,
    Destructive,
}

/// Error raised by a modal callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ActionError(String);

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        Self(format!("{err:#}"))
    }
}

type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>> + Send>>;

/// Side effect attached to the confirm or cancel path of a dialog.
///
/// Actions are shared closures producing a fresh future on each call, so a
/// request can be cloned while the queue still owns the original.
#[derive(Clone)]
pub struct ModalAction(Arc<dyn Fn() -> ActionFuture + Send + Sync>);

impl ModalAction {
    /// Wrap an asynchronous operation.
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        let action: Arc<dyn Fn() -> ActionFuture + Send + Sync> =
            Arc::new(move || Box::pin(operation()) as ActionFuture);
        Self(action)
    }

    /// Wrap a synchronous operation.
    pub fn sync<F>(operation: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::new(move || std::future::ready(operation()))
    }

    fn invoke(&self) -> ActionFuture {
        (self.0)()
    }
}

impl fmt::Debug for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ModalAction(..)")
    }
}

/// Description of a dialog to show. The id is assigned by the queue.
#[derive(Debug, Clone)]
pub struct ModalRequest {
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
    pub confirm_label: Option<String>,
    pub cancel_label: Option<String>,
    pub show_cancel: bool,
    pub confirm_style: ConfirmStyle,
    pub on_confirm: Option<ModalAction>,
    pub on_cancel: Option<ModalAction>,
}

impl ModalRequest {
    pub fn new(kind: ModalKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            confirm_label: None,
            cancel_label: None,
            show_cancel: true,
            confirm_style: ConfirmStyle::Default,
            on_confirm: None,
            on_cancel: None,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ModalKind::Confirm, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ModalKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ModalKind::Error, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ModalKind::Info, title, message)
    }

    #[must_use]
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    /// Alert-only dialogs set this to `false`.
    #[must_use]
    pub fn show_cancel(mut self, show: bool) -> Self {
        self.show_cancel = show;
        self
    }

    #[must_use]
    pub fn confirm_style(mut self, style: ConfirmStyle) -> Self {
        self.confirm_style = style;
        self
    }

    #[must_use]
    pub fn destructive(self) -> Self {
        self.confirm_style(ConfirmStyle::Destructive)
    }

    #[must_use]
    pub fn on_confirm(mut self, action: ModalAction) -> Self {
        self.on_confirm = Some(action);
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, action: ModalAction) -> Self {
        self.on_cancel = Some(action);
        self
    }
}

/// How a dialog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Confirmed,
    Cancelled,
    /// Removed by `close_modal`/`clear_modals` or by dropping the queue.
    Dismissed,
    /// The confirm or cancel action returned an error.
    Failed(String),
}

impl ModalOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Presentation phase of a queued dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalPhase {
    /// Enqueued, entry transition still running.
    Queued,
    Visible,
    /// An action is running; confirm and cancel are unavailable.
    Busy,
}

/// Render-ready view of one queued dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalSnapshot {
    pub id: ModalId,
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub show_cancel: bool,
    pub confirm_style: ConfirmStyle,
    pub phase: ModalPhase,
}

impl ModalSnapshot {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == ModalPhase::Busy
    }

    /// Text for the confirm button, replaced by a progress label while busy.
    #[must_use]
    pub fn confirm_text(&self) -> &str {
        if self.is_busy() {
            MODAL_BUSY_LABEL
        } else {
            &self.confirm_label
        }
    }

    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        !self.is_busy()
    }
}

/// Lifecycle notifications published by the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Opened(ModalId),
    Busy(ModalId),
    Resolved { id: ModalId, outcome: ModalOutcome },
}

/// Errors returned by the confirm and cancel handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("Modal not found: {0}")]
    NotFound(ModalId),

    #[error("Modal is busy: {0}")]
    Busy(ModalId),

    #[error("Modal action failed for {id}: {message}")]
    Action { id: ModalId, message: String },
}

/// Defaults applied to every request the queue accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSettings {
    pub confirm_label: String,
    pub cancel_label: String,
    pub entry_delay: Duration,
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self {
            confirm_label: DEFAULT_CONFIRM_LABEL.to_string(),
            cancel_label: DEFAULT_CANCEL_LABEL.to_string(),
            entry_delay: Duration::from_millis(DEFAULT_MODAL_ENTRY_DELAY_MS),
        }
    }
}

struct ModalEntry {
    id: ModalId,
    request: ModalRequest,
    confirm_label: String,
    cancel_label: String,
    visible: bool,
    busy: bool,
    responder: Option<oneshot::Sender<ModalOutcome>>,
    entry_timer: Option<AbortHandle>,
}

impl ModalEntry {
    fn snapshot(&self) -> ModalSnapshot {
        let phase = if self.busy {
            ModalPhase::Busy
        } else if self.visible {
            ModalPhase::Visible
        } else {
            ModalPhase::Queued
        };

        ModalSnapshot {
            id: self.id,
            kind: self.request.kind,
            title: self.request.title.clone(),
            message: self.request.message.clone(),
            confirm_label: self.confirm_label.clone(),
            cancel_label: self.cancel_label.clone(),
            show_cancel: self.request.show_cancel,
            confirm_style: self.request.confirm_style,
            phase,
        }
    }

    fn resolve(&mut self, outcome: ModalOutcome) {
        if let Some(responder) = self.responder.take() {
            // The caller may have dropped its PendingModal; that is not an error.
            let _ = responder.send(outcome);
        }
    }
}

impl Drop for ModalEntry {
    fn drop(&mut self) {
        if let Some(timer) = self.entry_timer.take() {
            timer.abort();
        }
    }
}

#[derive(Default)]
struct ModalState {
    entries: Vec<ModalEntry>,
}

impl ModalState {
    fn position(&self, id: ModalId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn find_mut(&mut self, id: ModalId) -> Option<&mut ModalEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    fn snapshots(&self) -> Vec<ModalSnapshot> {
        self.entries.iter().map(ModalEntry::snapshot).collect()
    }
}

struct Shared {
    state: Mutex<ModalState>,
    snapshots: watch::Sender<Vec<ModalSnapshot>>,
    events: broadcast::Sender<ModalEvent>,
    settings: ModalSettings,
}

/// Owned store of pending dialogs. Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct ModalQueue {
    shared: Arc<Shared>,
}

impl Default for ModalQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalQueue {
    pub fn new() -> Self {
        Self::with_settings(ModalSettings::default())
    }

    pub fn with_settings(settings: ModalSettings) -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ModalState::default()),
                snapshots,
                events,
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &ModalSettings {
        &self.shared.settings
    }

    /// Enqueue a dialog and return a future resolving to `true` on confirmation.
    ///
    /// Must be called from within a Tokio runtime: the entry transition is timed.
    pub fn show_modal(&self, request: ModalRequest) -> PendingModal {
        let id = ModalId::new();
        let (responder, receiver) = oneshot::channel();
        let settings = &self.shared.settings;
        let delay = settings.entry_delay;

        info!("Showing {:?} modal {}: {}", request.kind, id, request.title);

        let entry = ModalEntry {
            id,
            confirm_label: request
                .confirm_label
                .clone()
                .unwrap_or_else(|| settings.confirm_label.clone()),
            cancel_label: request
                .cancel_label
                .clone()
                .unwrap_or_else(|| settings.cancel_label.clone()),
            request,
            visible: delay.is_zero(),
            busy: false,
            responder: Some(responder),
            entry_timer: None,
        };

        {
            let mut state = self.lock();
            state.entries.push(entry);
            self.publish(&state);
        }
        self.emit(ModalEvent::Opened(id));

        if !delay.is_zero() {
            self.schedule_entry(id, delay);
        }

        PendingModal { id, receiver }
    }

    /// Run the confirm path: `on_confirm` (if any) then resolve `true`.
    ///
    /// While the action runs the dialog is busy and further confirm/cancel
    /// calls fail with [`ModalError::Busy`]. A failing action ends the busy
    /// state, removes the dialog and resolves the future to `false`.
    pub async fn confirm(&self, id: ModalId) -> Result<(), ModalError> {
        let action = self.begin(id, |request| request.on_confirm.clone())?;
        self.complete(id, action, ModalOutcome::Confirmed).await
    }

    /// Run the cancel path: `on_cancel` (if any) then resolve `false`.
    pub async fn cancel(&self, id: ModalId) -> Result<(), ModalError> {
        let action = self.begin(id, |request| request.on_cancel.clone())?;
        self.complete(id, action, ModalOutcome::Cancelled).await
    }

    /// Remove a dialog without running either callback.
    ///
    /// The pending future resolves to `false` ([`ModalOutcome::Dismissed`]).
    /// Unknown ids are ignored.
    pub fn close_modal(&self, id: ModalId) {
        if !self.finish(id, ModalOutcome::Dismissed) {
            debug!("close_modal: {} is not queued", id);
        }
    }

    /// Remove every queued dialog, resolving each as dismissed.
    pub fn clear_modals(&self) {
        let removed: Vec<ModalId> = {
            let mut state = self.lock();
            let mut drained: Vec<ModalEntry> = state.entries.drain(..).collect();
            for entry in &mut drained {
                entry.resolve(ModalOutcome::Dismissed);
            }
            self.publish(&state);
            drained.iter().map(|entry| entry.id).collect()
        };

        if !removed.is_empty() {
            info!("Cleared {} modal(s)", removed.len());
        }
        for id in removed {
            self.emit(ModalEvent::Resolved {
                id,
                outcome: ModalOutcome::Dismissed,
            });
        }
    }

    /// Current dialogs in display order.
    pub fn snapshot(&self) -> Vec<ModalSnapshot> {
        self.lock().snapshots()
    }

    /// The dialog at the front of the queue, which receives focus.
    pub fn focused(&self) -> Option<ModalSnapshot> {
        self.lock().entries.first().map(ModalEntry::snapshot)
    }

    pub fn get(&self, id: ModalId) -> Option<ModalSnapshot> {
        let state = self.lock();
        state.position(id).map(|index| state.entries[index].snapshot())
    }

    pub fn contains(&self, id: ModalId) -> bool {
        self.lock().position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receiver updated with a fresh snapshot on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ModalSnapshot>> {
        self.shared.snapshots.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<ModalEvent> {
        self.shared.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, ModalState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, state: &ModalState) {
        self.shared.snapshots.send_replace(state.snapshots());
    }

    fn emit(&self, event: ModalEvent) {
        // No subscribers is fine.
        let _ = self.shared.events.send(event);
    }

    fn schedule_entry(&self, id: ModalId, delay: Duration) {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                ModalQueue { shared }.mark_visible(id);
            }
        });

        let mut state = self.lock();
        match state.find_mut(id) {
            Some(entry) if !entry.visible => entry.entry_timer = Some(handle.abort_handle()),
            _ => handle.abort(),
        }
    }

    fn mark_visible(&self, id: ModalId) {
        let mut state = self.lock();
        if let Some(entry) = state.find_mut(id) {
            entry.visible = true;
            entry.entry_timer = None;
            self.publish(&state);
        }
    }

    /// Validate that the dialog accepts input and pick the action to run.
    /// Marks the dialog busy when there is an action.
    fn begin(
        &self,
        id: ModalId,
        pick: impl FnOnce(&ModalRequest) -> Option<ModalAction>,
    ) -> Result<Option<ModalAction>, ModalError> {
        let mut state = self.lock();
        let entry = state.find_mut(id).ok_or(ModalError::NotFound(id))?;
        if entry.busy {
            return Err(ModalError::Busy(id));
        }

        let action = pick(&entry.request);
        if action.is_some() {
            entry.busy = true;
            self.publish(&state);
            drop(state);
            self.emit(ModalEvent::Busy(id));
        }
        Ok(action)
    }

    async fn complete(
        &self,
        id: ModalId,
        action: Option<ModalAction>,
        success: ModalOutcome,
    ) -> Result<(), ModalError> {
        let Some(action) = action else {
            self.finish(id, success);
            return Ok(());
        };

        // The action and the resolution run in their own task so that a
        // caller dropping this future cannot leave the dialog busy forever.
        let queue = self.clone();
        let completion = tokio::spawn(async move {
            let result = match tokio::spawn(action.invoke()).await {
                Ok(result) => result,
                Err(join_error) => Err(ActionError::new(format!("action aborted: {join_error}"))),
            };

            match result {
                Ok(()) => {
                    if !queue.finish(id, success) {
                        debug!("{} was closed while its action was running", id);
                    }
                    Ok(())
                }
                Err(err) => {
                    warn!("Modal action failed for {}: {}", id, err);
                    queue.finish(id, ModalOutcome::Failed(err.message().to_string()));
                    Err(ModalError::Action {
                        id,
                        message: err.message().to_string(),
                    })
                }
            }
        });

        completion.await.unwrap_or_else(|join_error| {
            Err(ModalError::Action {
                id,
                message: join_error.to_string(),
            })
        })
    }

    /// Remove the dialog and resolve its future. Returns `false` if it was
    /// already gone.
    fn finish(&self, id: ModalId, outcome: ModalOutcome) -> bool {
        {
            let mut state = self.lock();
            let Some(index) = state.position(id) else {
                return false;
            };
            let mut entry = state.entries.remove(index);
            entry.resolve(outcome.clone());
            self.publish(&state);
        }

        info!("Modal {} resolved: {:?}", id, outcome);
        self.emit(ModalEvent::Resolved { id, outcome });
        true
    }
}

/// Future returned by [`ModalQueue::show_modal`].
///
/// Resolves to `true` only when the dialog was confirmed and its `on_confirm`
/// action (if any) succeeded.
#[derive(Debug)]
#[must_use = "the pending modal resolves to the user's answer"]
pub struct PendingModal {
    id: ModalId,
    receiver: oneshot::Receiver<ModalOutcome>,
}

impl PendingModal {
    pub fn id(&self) -> ModalId {
        self.id
    }

    /// Wait for the full outcome instead of a boolean.
    pub async fn outcome(self) -> ModalOutcome {
        self.receiver.await.unwrap_or(ModalOutcome::Dismissed)
    }
}

impl Future for PendingModal {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.map(|outcome| outcome.is_confirmed()).unwrap_or(false))
    }
}
