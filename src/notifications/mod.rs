//! Notification core: queued confirmation modals and auto-expiring toasts.
//!
//! The two queues are independent. [`Notifications`] is the provider that owns
//! one of each for the lifetime of a session and is handed to consumers through
//! [`crate::context::AppContext`].

pub mod modal;
pub mod toast;

use std::time::Duration;

pub use modal::{
    ActionError, ConfirmStyle, ModalAction, ModalError, ModalEvent, ModalId, ModalKind, ModalOutcome, ModalPhase,
    ModalQueue, ModalRequest, ModalSettings, ModalSnapshot, PendingModal,
};
pub use toast::{RemovalReason, Toast, ToastEvent, ToastId, ToastKind, ToastQueue, ToastRequest, ToastSettings};

use crate::config::NotificationsConfig;

/// Session-lifetime owner of the modal and toast queues.
#[derive(Clone, Default)]
pub struct Notifications {
    modals: ModalQueue,
    toasts: ToastQueue,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(modal_settings: ModalSettings, toast_settings: ToastSettings) -> Self {
        Self {
            modals: ModalQueue::with_settings(modal_settings),
            toasts: ToastQueue::with_settings(toast_settings),
        }
    }

    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::with_settings(
            ModalSettings {
                confirm_label: config.confirm_label.clone(),
                cancel_label: config.cancel_label.clone(),
                entry_delay: Duration::from_millis(config.modal_entry_delay_ms),
            },
            ToastSettings {
                default_duration: Duration::from_millis(config.toast_duration_ms),
            },
        )
    }

    pub fn modals(&self) -> &ModalQueue {
        &self.modals
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Drop everything on screen, e.g. on teardown.
    pub fn clear_all(&self) {
        self.modals.clear_modals();
        self.toasts.clear_toasts();
    }
}
