//! In-memory inventory backend.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::{
    ApiError, CreateCustomerPayload, CreateProductPayload, Customer, InventoryApi, Product, Sede,
    SedeProductAssociation, UpdateCustomerPayload, UpdateProductPayload,
};

#[derive(Default)]
struct Inventory {
    products: Vec<Product>,
    sedes: Vec<Sede>,
    associations: Vec<SedeProductAssociation>,
    customers: Vec<Customer>,
    next_product_id: i64,
    next_customer_id: i64,
    fail_next: Option<ApiError>,
}

/// `InventoryApi` backed by process memory. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct MemoryApi {
    inner: Arc<Mutex<Inventory>>,
    latency: Option<Duration>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog with two sedes and a handful of products.
    pub fn seeded() -> Self {
        let api = Self::new();
        {
            let mut inventory = api.lock();
            inventory.sedes = vec![
                Sede {
                    id: 1,
                    name: "Sede Central".to_string(),
                    address: "Av. Principal 123".to_string(),
                },
                Sede {
                    id: 2,
                    name: "Sede Norte".to_string(),
                    address: "Calle 45 #10-20".to_string(),
                },
            ];

            let now = Utc::now();
            let seed = [
                ("Teclado mecánico", "TEC-001", Some("Periféricos"), 189_900.0),
                ("Mouse inalámbrico", "MOU-002", Some("Periféricos"), 79_900.0),
                ("Monitor 27\"", "MON-003", Some("Pantallas"), 1_249_000.0),
            ];
            for (index, (name, sku, category, price)) in seed.into_iter().enumerate() {
                let id = index as i64 + 1;
                inventory.products.push(Product {
                    id,
                    name: name.to_string(),
                    sku: sku.to_string(),
                    category: category.map(str::to_string),
                    price,
                    description: None,
                    created_at: now,
                    updated_at: None,
                });
                inventory.associations.push(SedeProductAssociation {
                    sede_id: 1,
                    product_id: id,
                    stock_at_sede: 10,
                });
            }
            inventory.next_product_id = inventory.products.len() as i64 + 1;
            inventory.next_customer_id = 1;
        }
        api
    }

    /// Delay every call by `latency`, to observe busy states.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn add_sede(&self, name: impl Into<String>, address: impl Into<String>) -> Sede {
        let mut inventory = self.lock();
        let sede = Sede {
            id: inventory.sedes.iter().map(|sede| sede.id).max().unwrap_or(0) + 1,
            name: name.into(),
            address: address.into(),
        };
        inventory.sedes.push(sede.clone());
        sede
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().fail_next = Some(error);
    }

    /// Stock recorded for a product at a sede.
    pub fn stock_at(&self, sede_id: i64, product_id: i64) -> Option<i64> {
        self.lock()
            .associations
            .iter()
            .find(|assoc| assoc.sede_id == sede_id && assoc.product_id == product_id)
            .map(|assoc| assoc.stock_at_sede)
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Simulated round trip: latency, then an injected failure if any.
    async fn round_trip(&self, operation: &str) -> Result<MutexGuard<'_, Inventory>, ApiError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut inventory = self.lock();
        if let Some(error) = inventory.fail_next.take() {
            debug!("MemoryApi {} failing on request: {}", operation, error);
            return Err(error);
        }
        Ok(inventory)
    }
}

fn validate_product_fields(name: &str, sku: &str, price: f64) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("El nombre es obligatorio".to_string()));
    }
    if sku.trim().is_empty() {
        return Err(ApiError::Validation("El SKU es obligatorio".to_string()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::Validation("El precio debe ser un número positivo".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ApiError::Validation(format!("Email inválido: {email}"))),
    }
}

#[async_trait]
impl InventoryApi for MemoryApi {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let inventory = self.round_trip("get_products").await?;
        Ok(inventory.products.clone())
    }

    async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        let inventory = self.round_trip("get_product").await?;
        inventory
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("product {id}")))
    }

    async fn create_product(&self, payload: CreateProductPayload) -> Result<Product, ApiError> {
        let mut inventory = self.round_trip("create_product").await?;

        validate_product_fields(&payload.name, &payload.sku, payload.price)?;
        if payload.initial_stock_at_sede < 0 {
            return Err(ApiError::Validation("El stock inicial no puede ser negativo".to_string()));
        }
        if inventory.products.iter().any(|product| product.sku == payload.sku) {
            return Err(ApiError::Validation(format!("El SKU {} ya existe", payload.sku)));
        }
        if !inventory.sedes.iter().any(|sede| sede.id == payload.sede_id) {
            return Err(ApiError::NotFound(format!("sede {}", payload.sede_id)));
        }

        inventory.next_product_id = inventory.next_product_id.max(1);
        let id = inventory.next_product_id;
        inventory.next_product_id += 1;

        let product = Product {
            id,
            name: payload.name,
            sku: payload.sku,
            category: payload.category,
            price: payload.price,
            description: payload.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        inventory.products.push(product.clone());
        inventory.associations.push(SedeProductAssociation {
            sede_id: payload.sede_id,
            product_id: id,
            stock_at_sede: payload.initial_stock_at_sede,
        });

        info!("Created product {} ({})", product.id, product.sku);
        Ok(product)
    }

    async fn update_product(&self, id: i64, payload: UpdateProductPayload) -> Result<Product, ApiError> {
        let mut inventory = self.round_trip("update_product").await?;

        if let Some(sku) = &payload.sku {
            if inventory.products.iter().any(|product| product.id != id && &product.sku == sku) {
                return Err(ApiError::Validation(format!("El SKU {sku} ya existe")));
            }
        }

        let product = inventory
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;

        let name = payload.name.as_deref().unwrap_or(&product.name);
        let sku = payload.sku.as_deref().unwrap_or(&product.sku);
        let price = payload.price.unwrap_or(product.price);
        validate_product_fields(name, sku, price)?;

        if let Some(name) = payload.name {
            product.name = name;
        }
        if let Some(sku) = payload.sku {
            product.sku = sku;
        }
        if let Some(price) = payload.price {
            product.price = price;
        }
        if payload.description.is_some() {
            product.description = payload.description;
        }
        if payload.category.is_some() {
            product.category = payload.category;
        }
        product.updated_at = Some(Utc::now());

        Ok(product.clone())
    }

    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let mut inventory = self.round_trip("delete_product").await?;

        let before = inventory.products.len();
        inventory.products.retain(|product| product.id != id);
        if inventory.products.len() == before {
            return Err(ApiError::NotFound(format!("product {id}")));
        }
        inventory.associations.retain(|assoc| assoc.product_id != id);

        info!("Deleted product {}", id);
        Ok(())
    }

    async fn get_sedes(&self) -> Result<Vec<Sede>, ApiError> {
        let inventory = self.round_trip("get_sedes").await?;
        Ok(inventory.sedes.clone())
    }

    async fn create_sede_product_association(
        &self,
        association: SedeProductAssociation,
    ) -> Result<SedeProductAssociation, ApiError> {
        let mut inventory = self.round_trip("create_sede_product_association").await?;

        if association.stock_at_sede < 0 {
            return Err(ApiError::Validation("El stock no puede ser negativo".to_string()));
        }
        if !inventory.sedes.iter().any(|sede| sede.id == association.sede_id) {
            return Err(ApiError::NotFound(format!("sede {}", association.sede_id)));
        }
        if !inventory.products.iter().any(|product| product.id == association.product_id) {
            return Err(ApiError::NotFound(format!("product {}", association.product_id)));
        }

        match inventory
            .associations
            .iter_mut()
            .find(|assoc| assoc.sede_id == association.sede_id && assoc.product_id == association.product_id)
        {
            Some(existing) => existing.stock_at_sede = association.stock_at_sede,
            None => inventory.associations.push(association.clone()),
        }
        Ok(association)
    }

    async fn get_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let inventory = self.round_trip("get_customers").await?;
        Ok(inventory.customers.clone())
    }

    async fn get_customer(&self, id: i64) -> Result<Customer, ApiError> {
        let inventory = self.round_trip("get_customer").await?;
        inventory
            .customers
            .iter()
            .find(|customer| customer.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("customer {id}")))
    }

    async fn create_customer(&self, payload: CreateCustomerPayload) -> Result<Customer, ApiError> {
        let mut inventory = self.round_trip("create_customer").await?;

        if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
            return Err(ApiError::Validation("Nombre y apellido son obligatorios".to_string()));
        }
        validate_email(&payload.email)?;
        if inventory.customers.iter().any(|customer| customer.email == payload.email) {
            return Err(ApiError::Validation(format!("El email {} ya existe", payload.email)));
        }

        inventory.next_customer_id = inventory.next_customer_id.max(1);
        let id = inventory.next_customer_id;
        inventory.next_customer_id += 1;

        let customer = Customer {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            created_at: Utc::now(),
            updated_at: None,
        };
        inventory.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, id: i64, payload: UpdateCustomerPayload) -> Result<Customer, ApiError> {
        let mut inventory = self.round_trip("update_customer").await?;

        if let Some(email) = &payload.email {
            validate_email(email)?;
            if inventory.customers.iter().any(|customer| customer.id != id && &customer.email == email) {
                return Err(ApiError::Validation(format!("El email {email} ya existe")));
            }
        }

        let customer = inventory
            .customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("customer {id}")))?;

        if let Some(first_name) = payload.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = payload.last_name {
            customer.last_name = last_name;
        }
        if let Some(email) = payload.email {
            customer.email = email;
        }
        if payload.phone.is_some() {
            customer.phone = payload.phone;
        }
        if payload.address.is_some() {
            customer.address = payload.address;
        }
        customer.updated_at = Some(Utc::now());

        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: i64) -> Result<(), ApiError> {
        let mut inventory = self.round_trip("delete_customer").await?;

        let before = inventory.customers.len();
        inventory.customers.retain(|customer| customer.id != id);
        if inventory.customers.len() == before {
            return Err(ApiError::NotFound(format!("customer {id}")));
        }
        Ok(())
    }
}
