use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use models::{Order, OrderInput, Product, ProductInput};
use server::routes::build_router;
use server::startup::{build_app, build_cors};
use server::state::ServerState;
use service::errors::ServiceError;
use service::repository::{OrderRepository, ProductRepository};

struct TestApp {
    router: Router,
    data_dir: PathBuf,
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("server_routes_{}", Uuid::new_v4()));
        let router = build_app(&data_dir).await?;
        Ok(Self { router, data_dir })
    }

    async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.router.clone().oneshot(req).await?;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, body))
    }

    async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        let req = Request::builder().method("GET").uri(uri).body(Body::empty())?;
        self.send(req).await
    }

    async fn post(&self, uri: &str, payload: Value) -> anyhow::Result<(StatusCode, Value)> {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))?;
        self.send(req).await
    }

    async fn post_raw(&self, uri: &str, body: &'static str) -> anyhow::Result<(StatusCode, Value)> {
        let req = Request::builder().method("POST").uri(uri).body(Body::from(body))?;
        self.send(req).await
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
    }
}

fn widget() -> Value {
    json!({"name": "Widget", "price": 9.99, "description": "A widget"})
}

#[tokio::test]
async fn startup_creates_empty_data_files() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    assert_eq!(tokio::fs::read_to_string(app.data_dir.join("products.json")).await?, "[]");
    assert_eq!(tokio::fs::read_to_string(app.data_dir.join("orders.json")).await?, "[]");

    let (status, body) = app.get("/api/products").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn create_product_assigns_sequential_ids() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, first) = app.post("/api/products", widget()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Widget");
    assert_eq!(first["price"], 9.99);
    assert!(first["createdAt"].is_string());

    let (status, second) = app.post("/api/products", widget()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], 2);

    let (status, listed) = app.get("/api/products").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([first, second]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn client_supplied_id_is_ignored() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, created) = app.post("/api/products", json!({"id": 500, "name": "Gadget"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["price"], Value::Null);
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn order_for_existing_product_is_pending() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post("/api/products", widget()).await?;

    let (status, order) = app
        .post(
            "/api/orders",
            json!({"customerName": "Alice", "items": [{"productId": 1}], "totalAmount": 9.99}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["id"], 1);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["items"], json!([{"productId": 1}]));

    let (status, listed) = app.get("/api/orders").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([order]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn order_for_unknown_product_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post("/api/products", widget()).await?;

    let (status, body) = app
        .post(
            "/api/orders",
            json!({"customerName": "Bob", "items": [{"productId": 99}], "totalAmount": 5}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Le produit avec l'ID 99 n'existe pas"}));

    let (_, listed) = app.get("/api/orders").await?;
    assert_eq!(listed, json!([]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn order_without_items_is_accepted() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, order) = app
        .post("/api/orders", json!({"customerName": "Cleo", "items": [], "totalAmount": 0}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["items"], json!([]));
    assert_eq!(order["status"], "pending");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn corrupt_catalog_yields_generic_500() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    tokio::fs::write(app.data_dir.join("products.json"), "not json").await?;

    let (status, body) = app.get("/api/products").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Erreur lors de la récupération des produits"}));

    let (status, body) = app.post("/api/products", widget()).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Erreur lors de l'ajout du produit"}));

    let (status, body) = app
        .post("/api/orders", json!({"customerName": "Dora", "items": [{"productId": 1}]}))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Erreur lors de la création de la commande"}));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn missing_orders_file_yields_generic_500() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    tokio::fs::remove_file(app.data_dir.join("orders.json")).await?;

    let (status, body) = app.get("/api/orders").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Erreur lors de la récupération des commandes"}));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_json_400() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"customerName\": "))?;
    let (status, body) = app.send(req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Corps de requête JSON invalide"}));

    let (_, listed) = app.get("/api/orders").await?;
    assert_eq!(listed, json!([]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn cors_preflight_is_allowed_for_any_origin() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/products")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    let res = app.router.clone().oneshot(req).await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn caller_values_are_stored_as_sent() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, text_price) = app.post("/api/products", json!({"name": "W", "price": "9.99"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(text_price["price"], json!("9.99"));

    let (status, int_price) = app.post("/api/products", json!({"name": 123, "price": 1})).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(int_price["name"], json!(123));
    assert!(int_price["price"].is_u64());
    assert_eq!(int_price["price"], json!(1));

    let raw = tokio::fs::read_to_string(app.data_dir.join("products.json")).await?;
    assert!(raw.contains("\"price\": 1,\n"));

    let (status, order) = app
        .post("/api/orders", json!({"customerName": "A", "items": [], "totalAmount": "5"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["totalAmount"], json!("5"));

    let (_, listed) = app.get("/api/products").await?;
    assert_eq!(listed, json!([text_price, int_price]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn body_without_content_type_is_still_read() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, named) = app.post_raw("/api/products", r#"{"name": "Plain"}"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(named["name"], "Plain");

    let (status, empty) = app.post_raw("/api/products", "").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(empty["id"], 2);
    assert!(empty.get("name").is_none());
    assert_eq!(empty["price"], Value::Null);

    let (status, order) = app.post_raw("/api/orders", "").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["items"], json!([]));
    assert_eq!(order["status"], "pending");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn created_at_always_has_millisecond_digits() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, product) = app.post("/api/products", widget()).await?;
    let created_at = product["createdAt"].as_str().unwrap_or_default();
    assert_eq!(created_at.len(), "2024-05-01T10:20:30.000Z".len());
    assert!(created_at.ends_with('Z'));
    app.cleanup().await;
    Ok(())
}

/// Stores whose writes always fail, as on a full or read-only disk.
struct FailingStores;

#[async_trait::async_trait]
impl ProductRepository for FailingStores {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(Vec::new())
    }
    async fn create_product(&self, _input: ProductInput) -> Result<Product, ServiceError> {
        Err(ServiceError::StorageWrite("data/products.json: No space left on device".into()))
    }
}

#[async_trait::async_trait]
impl OrderRepository for FailingStores {
    async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
        Ok(Vec::new())
    }
    async fn create_order(&self, _input: OrderInput) -> Result<Order, ServiceError> {
        Err(ServiceError::StorageWrite("data/orders.json: No space left on device".into()))
    }
}

#[tokio::test]
async fn failed_writes_answer_generic_500() -> anyhow::Result<()> {
    let stores = Arc::new(FailingStores);
    let state = ServerState { catalog: stores.clone(), orders: stores };
    let router = build_router(state, build_cors());

    let req = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(widget().to_string()))?;
    let res = router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    assert_eq!(body, json!({"error": "Erreur lors de l'ajout du produit"}));

    let req = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"customerName": "Zed", "items": []}).to_string()))?;
    let res = router.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    assert_eq!(body, json!({"error": "Erreur lors de la création de la commande"}));
    Ok(())
}
