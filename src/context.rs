//! Capability injection for consumers of the notification core.
//!
//! Components receive an [`AppContext`] and ask it for the capabilities they
//! need. Asking for one that was never provided is a wiring defect and is
//! reported as [`ContextError::MissingProvider`].

use std::sync::Arc;

use crate::api::InventoryApi;
use crate::icons::IconService;
use crate::notifications::{ModalQueue, Notifications, ToastQueue};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("{0} must be used within a provider that supplies it")]
    MissingProvider(&'static str),
}

#[derive(Clone, Default)]
pub struct AppContext {
    notifications: Option<Notifications>,
    api: Option<Arc<dyn InventoryApi>>,
    pub icons: IconService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_notifications(mut self, notifications: Notifications) -> Self {
        self.notifications = Some(notifications);
        self
    }

    #[must_use]
    pub fn with_api(mut self, api: Arc<dyn InventoryApi>) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn with_icons(mut self, icons: IconService) -> Self {
        self.icons = icons;
        self
    }

    pub fn notifications(&self) -> Result<&Notifications, ContextError> {
        self.notifications
            .as_ref()
            .ok_or(ContextError::MissingProvider("Notifications"))
    }

    pub fn modals(&self) -> Result<&ModalQueue, ContextError> {
        self.notifications
            .as_ref()
            .map(Notifications::modals)
            .ok_or(ContextError::MissingProvider("ModalQueue"))
    }

    pub fn toasts(&self) -> Result<&ToastQueue, ContextError> {
        self.notifications
            .as_ref()
            .map(Notifications::toasts)
            .ok_or(ContextError::MissingProvider("ToastQueue"))
    }

    pub fn api(&self) -> Result<Arc<dyn InventoryApi>, ContextError> {
        self.api.clone().ok_or(ContextError::MissingProvider("InventoryApi"))
    }
}
