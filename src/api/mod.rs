//! Inventory API abstraction.
//!
//! The notification core only cares that these calls resolve or fail. This
//! module defines the interface every inventory backend implements, along with
//! the product, sede and customer models exchanged with it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::ActionError;

pub mod memory;

pub use memory::MemoryApi;

/// Common error types for API operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Other(String),
}

impl From<ApiError> for ActionError {
    fn from(err: ApiError) -> Self {
        ActionError::new(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a product together with its stock at one sede.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sede_id: i64,
    pub initial_stock_at_sede: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A location (branch) that holds stock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sede {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// Stock of one product at one sede. Field names follow the wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SedeProductAssociation {
    pub sede_id: i64,
    pub product_id: i64,
    pub stock_at_sede: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Interface to the inventory service.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Returns the backend type identifier (e.g., "memory").
    fn backend_type(&self) -> &str;

    // Products
    async fn get_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn get_product(&self, id: i64) -> Result<Product, ApiError>;
    async fn create_product(&self, payload: CreateProductPayload) -> Result<Product, ApiError>;
    async fn update_product(&self, id: i64, payload: UpdateProductPayload) -> Result<Product, ApiError>;
    async fn delete_product(&self, id: i64) -> Result<(), ApiError>;

    // Sedes
    async fn get_sedes(&self) -> Result<Vec<Sede>, ApiError>;
    async fn create_sede_product_association(
        &self,
        association: SedeProductAssociation,
    ) -> Result<SedeProductAssociation, ApiError>;

    // Customers
    async fn get_customers(&self) -> Result<Vec<Customer>, ApiError>;
    async fn get_customer(&self, id: i64) -> Result<Customer, ApiError>;
    async fn create_customer(&self, payload: CreateCustomerPayload) -> Result<Customer, ApiError>;
    async fn update_customer(&self, id: i64, payload: UpdateCustomerPayload) -> Result<Customer, ApiError>;
    async fn delete_customer(&self, id: i64) -> Result<(), ApiError>;
}
