//! Product workflows.
//!
//! These wrap inventory API calls with the confirmation modal and the toast
//! that report their outcome to the user.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};

use crate::api::{CreateProductPayload, InventoryApi, Product, UpdateProductPayload};
use crate::constants::{
    ERROR_PRODUCT_DELETE_FAILED, ERROR_PRODUCT_LOAD_FAILED, ERROR_PRODUCT_LOAD_FALLBACK, ERROR_PRODUCT_SAVE_FAILED,
    ERROR_UNKNOWN_DELETE, MODAL_DELETE_CONFIRM_LABEL, MODAL_DELETE_PRODUCT_MESSAGE, MODAL_DELETE_PRODUCT_TITLE,
    SUCCESS_PRODUCT_CREATED, SUCCESS_PRODUCT_CREATED_MESSAGE, SUCCESS_PRODUCT_DELETED,
    SUCCESS_PRODUCT_DELETED_MESSAGE, SUCCESS_PRODUCT_UPDATED, SUCCESS_PRODUCT_UPDATED_MESSAGE,
};
use crate::context::{AppContext, ContextError};
use crate::notifications::{
    ActionError, ModalAction, ModalOutcome, ModalQueue, ModalRequest, ToastQueue, ToastRequest,
};

/// Values collected by the product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Only used when creating
    pub sede_id: i64,
    /// Only used when creating
    pub initial_stock_at_sede: i64,
}

pub struct ProductActions {
    modals: ModalQueue,
    toasts: ToastQueue,
    api: Arc<dyn InventoryApi>,
}

impl ProductActions {
    pub fn new(modals: ModalQueue, toasts: ToastQueue, api: Arc<dyn InventoryApi>) -> Self {
        Self { modals, toasts, api }
    }

    pub fn from_context(context: &AppContext) -> Result<Self, ContextError> {
        Ok(Self::new(
            context.modals()?.clone(),
            context.toasts()?.clone(),
            context.api()?,
        ))
    }

    /// Fetch the catalog, reporting failures with an error toast.
    pub async fn load_products(&self) -> Result<Vec<Product>> {
        match self.api.get_products().await {
            Ok(products) => {
                info!("Loaded {} products", products.len());
                Ok(products)
            }
            Err(err) => {
                error!("Failed to fetch products: {}", err);
                let message = err.to_string();
                let message = if message.is_empty() {
                    ERROR_PRODUCT_LOAD_FALLBACK.to_string()
                } else {
                    message
                };
                self.toasts.add_toast(ToastRequest::error(ERROR_PRODUCT_LOAD_FAILED, message));
                Err(err).context(ERROR_PRODUCT_LOAD_FALLBACK)
            }
        }
    }

    /// Ask for confirmation, then delete the product.
    ///
    /// The deletion runs as the modal's confirm action, so the dialog is busy
    /// until the API answers. Returns `Ok(false)` when the user backs out.
    pub async fn delete_product(&self, product: &Product) -> Result<bool> {
        let api = Arc::clone(&self.api);
        let id = product.id;

        let request = ModalRequest::warning(MODAL_DELETE_PRODUCT_TITLE, MODAL_DELETE_PRODUCT_MESSAGE)
            .confirm_label(MODAL_DELETE_CONFIRM_LABEL)
            .destructive()
            .on_confirm(ModalAction::new(move || {
                let api = Arc::clone(&api);
                async move { api.delete_product(id).await.map_err(ActionError::from) }
            }));

        info!("Requesting confirmation to delete product {} ({})", product.id, product.sku);
        let pending = self.modals.show_modal(request);

        match pending.outcome().await {
            ModalOutcome::Confirmed => {
                self.toasts.add_toast(ToastRequest::success(
                    SUCCESS_PRODUCT_DELETED,
                    SUCCESS_PRODUCT_DELETED_MESSAGE,
                ));
                Ok(true)
            }
            ModalOutcome::Failed(message) => {
                error!("Error deleting product {}: {}", id, message);
                let message = if message.is_empty() {
                    ERROR_UNKNOWN_DELETE.to_string()
                } else {
                    message
                };
                self.toasts
                    .add_toast(ToastRequest::error(ERROR_PRODUCT_DELETE_FAILED, message.clone()));
                Err(anyhow::anyhow!(message)).with_context(|| format!("Failed to delete product {id}"))
            }
            ModalOutcome::Cancelled | ModalOutcome::Dismissed => {
                info!("Deletion of product {} was not confirmed", id);
                Ok(false)
            }
        }
    }

    /// Create a product, or update `editing` when given.
    pub async fn save_product(&self, form: ProductForm, editing: Option<&Product>) -> Result<Product> {
        let result = match editing {
            Some(product) => {
                let payload = UpdateProductPayload {
                    name: Some(form.name),
                    sku: Some(form.sku),
                    price: Some(form.price),
                    description: form.description,
                    category: form.category,
                };
                self.api
                    .update_product(product.id, payload)
                    .await
                    .map(|saved| (saved, SUCCESS_PRODUCT_UPDATED, SUCCESS_PRODUCT_UPDATED_MESSAGE))
            }
            None => {
                let payload = CreateProductPayload {
                    name: form.name,
                    sku: form.sku,
                    price: form.price,
                    description: form.description,
                    category: form.category,
                    sede_id: form.sede_id,
                    initial_stock_at_sede: form.initial_stock_at_sede,
                };
                self.api
                    .create_product(payload)
                    .await
                    .map(|saved| (saved, SUCCESS_PRODUCT_CREATED, SUCCESS_PRODUCT_CREATED_MESSAGE))
            }
        };

        match result {
            Ok((saved, title, message)) => {
                self.toasts.add_toast(ToastRequest::success(title, message));
                Ok(saved)
            }
            Err(err) => {
                error!("Error saving product: {}", err);
                self.toasts
                    .add_toast(ToastRequest::error(ERROR_PRODUCT_SAVE_FAILED, err.to_string()));
                Err(err).context("Failed to save product")
            }
        }
    }
}

/// Case-insensitive match on name or SKU. An empty filter keeps everything.
pub fn filter_products<'a>(products: &'a [Product], text: &str) -> Vec<&'a Product> {
    let needle = text.trim().to_lowercase();
    products
        .iter()
        .filter(|product| {
            needle.is_empty()
                || product.name.to_lowercase().contains(&needle)
                || product.sku.to_lowercase().contains(&needle)
        })
        .collect()
}
