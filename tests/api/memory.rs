use stockpanel::api::{
    ApiError, CreateCustomerPayload, CreateProductPayload, InventoryApi, MemoryApi, SedeProductAssociation,
    UpdateCustomerPayload, UpdateProductPayload,
};
use stockpanel::notifications::ActionError;

fn payload(sku: &str, sede_id: i64) -> CreateProductPayload {
    CreateProductPayload {
        name: "Audífonos".to_string(),
        sku: sku.to_string(),
        price: 99_900.0,
        description: None,
        category: Some("Audio".to_string()),
        sede_id,
        initial_stock_at_sede: 4,
    }
}

fn customer(email: &str) -> CreateCustomerPayload {
    CreateCustomerPayload {
        first_name: "Ana".to_string(),
        last_name: "Gómez".to_string(),
        email: email.to_string(),
        phone: Some("3001234567".to_string()),
        address: None,
    }
}

#[tokio::test]
async fn test_seeded_catalog() {
    let api = MemoryApi::seeded();

    assert_eq!(api.backend_type(), "memory");
    let products = api.get_products().await.unwrap();
    let skus: Vec<&str> = products.iter().map(|product| product.sku.as_str()).collect();
    assert_eq!(skus, vec!["TEC-001", "MOU-002", "MON-003"]);

    let sedes = api.get_sedes().await.unwrap();
    assert_eq!(sedes.len(), 2);
    assert_eq!(sedes[0].name, "Sede Central");
    assert_eq!(api.stock_at(1, 1), Some(10));
    assert_eq!(api.stock_at(2, 1), None);
}

#[tokio::test]
async fn test_create_product_records_stock() {
    let api = MemoryApi::seeded();

    let created = api.create_product(payload("AUD-004", 2)).await.unwrap();

    assert_eq!(created.id, 4);
    assert!(created.updated_at.is_none());
    assert_eq!(api.stock_at(2, created.id), Some(4));
    assert_eq!(api.get_product(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_create_product_validation() {
    let api = MemoryApi::seeded();

    let duplicate = api.create_product(payload("TEC-001", 1)).await.unwrap_err();
    assert!(matches!(duplicate, ApiError::Validation(_)));

    let unknown_sede = api.create_product(payload("AUD-004", 99)).await.unwrap_err();
    assert_eq!(unknown_sede, ApiError::NotFound("sede 99".to_string()));

    let mut blank = payload("AUD-004", 1);
    blank.name = "   ".to_string();
    assert!(matches!(api.create_product(blank).await, Err(ApiError::Validation(_))));

    let mut negative = payload("AUD-004", 1);
    negative.price = -1.0;
    assert!(matches!(api.create_product(negative).await, Err(ApiError::Validation(_))));

    let mut no_stock = payload("AUD-004", 1);
    no_stock.initial_stock_at_sede = -3;
    assert!(matches!(api.create_product(no_stock).await, Err(ApiError::Validation(_))));

    assert_eq!(api.get_products().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_product_changes_only_given_fields() {
    let api = MemoryApi::seeded();

    let updated = api
        .update_product(
            2,
            UpdateProductPayload {
                price: Some(69_900.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Mouse inalámbrico");
    assert_eq!(updated.price, 69_900.0);
    assert!(updated.updated_at.is_some());

    let clash = api
        .update_product(
            2,
            UpdateProductPayload {
                sku: Some("MON-003".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(clash, Err(ApiError::Validation(_))));

    let missing = api.update_product(42, UpdateProductPayload::default()).await;
    assert_eq!(missing, Err(ApiError::NotFound("product 42".to_string())));
}

#[tokio::test]
async fn test_delete_product_removes_stock() {
    let api = MemoryApi::seeded();

    api.delete_product(3).await.unwrap();

    assert_eq!(api.stock_at(1, 3), None);
    assert_eq!(api.get_product(3).await, Err(ApiError::NotFound("product 3".to_string())));
    assert_eq!(api.delete_product(3).await, Err(ApiError::NotFound("product 3".to_string())));
}

#[tokio::test]
async fn test_fail_next_applies_once() {
    let api = MemoryApi::seeded();
    api.fail_next(ApiError::Network("offline".to_string()));

    assert_eq!(api.get_sedes().await, Err(ApiError::Network("offline".to_string())));
    assert!(api.get_sedes().await.is_ok());
}

#[tokio::test]
async fn test_association_upserts_stock() {
    let api = MemoryApi::seeded();
    let sur = api.add_sede("Sede Sur", "Carrera 7 #80-15");
    assert_eq!(sur.id, 3);

    let association = SedeProductAssociation {
        sede_id: 3,
        product_id: 1,
        stock_at_sede: 5,
    };
    api.create_sede_product_association(association.clone()).await.unwrap();
    assert_eq!(api.stock_at(3, 1), Some(5));

    api.create_sede_product_association(SedeProductAssociation {
        stock_at_sede: 8,
        ..association
    })
    .await
    .unwrap();
    assert_eq!(api.stock_at(3, 1), Some(8));

    let unknown = api
        .create_sede_product_association(SedeProductAssociation {
            sede_id: 3,
            product_id: 77,
            stock_at_sede: 1,
        })
        .await;
    assert_eq!(unknown, Err(ApiError::NotFound("product 77".to_string())));
}

#[tokio::test]
async fn test_customer_crud() {
    let api = MemoryApi::new();

    let created = api.create_customer(customer("ana@example.com")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(api.get_customers().await.unwrap().len(), 1);

    let updated = api
        .update_customer(
            created.id,
            UpdateCustomerPayload {
                address: Some("Calle 10 #5-20".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Ana");
    assert_eq!(updated.address.as_deref(), Some("Calle 10 #5-20"));

    api.delete_customer(created.id).await.unwrap();
    assert!(matches!(api.get_customer(created.id).await, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_customer_email_rules() {
    let api = MemoryApi::new();

    assert!(matches!(
        api.create_customer(customer("sin-arroba")).await,
        Err(ApiError::Validation(_))
    ));

    api.create_customer(customer("ana@example.com")).await.unwrap();
    let other = api.create_customer(customer("luis@example.com")).await.unwrap();

    assert!(matches!(
        api.create_customer(customer("ana@example.com")).await,
        Err(ApiError::Validation(_))
    ));
    let taken = api
        .update_customer(
            other.id,
            UpdateCustomerPayload {
                email: Some("ana@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(taken, Err(ApiError::Validation(_))));
}

#[test]
fn test_api_error_becomes_action_error() {
    let err: ActionError = ApiError::NotFound("product 9".to_string()).into();
    assert_eq!(err.message(), "Resource not found: product 9");
}

#[tokio::test]
async fn test_models_use_camel_case_on_the_wire() {
    let api = MemoryApi::seeded();
    let product = api.get_product(1).await.unwrap();

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["sku"], "TEC-001");
    assert!(json.get("createdAt").is_some());
    assert!(json.get("created_at").is_none());

    let update = serde_json::to_value(UpdateProductPayload {
        name: Some("Nuevo".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(update, serde_json::json!({ "name": "Nuevo" }));

    let create = serde_json::to_value(payload("AUD-004", 1)).unwrap();
    assert_eq!(create["sedeId"], 1);
    assert_eq!(create["initialStockAtSede"], 4);

    let association: SedeProductAssociation =
        serde_json::from_str(r#"{"sede_id":1,"product_id":2,"stock_at_sede":3}"#).unwrap();
    assert_eq!(association.stock_at_sede, 3);
}
