//! Integration tests for the API server.

use std::sync::OnceLock;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use metrics_exporter_prometheus::PrometheusHandle;
use product_store::{InMemoryProductStore, Product, ProductId, ProductStore};
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    setup_with_store().0
}

fn setup_with_store() -> (axum::Router, InMemoryProductStore) {
    let store = InMemoryProductStore::new();
    let state = api::create_default_state(store.clone());
    (api::create_app(state, get_metrics_handle()), store)
}

/// A store that accepts writes without creating anything.
struct DiscardingStore;

#[async_trait]
impl ProductStore for DiscardingStore {
    async fn find_all(&self) -> product_store::Result<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: ProductId) -> product_store::Result<Option<Product>> {
        Ok(None)
    }

    async fn save(&self, _product: Product) -> product_store::Result<Option<Product>> {
        Ok(None)
    }

    async fn delete(&self, _id: ProductId) -> product_store::Result<()> {
        Ok(())
    }

    async fn find_all_ordered_by_name_asc(&self) -> product_store::Result<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn find_selling_price_above(
        &self,
        _threshold: i64,
    ) -> product_store::Result<Vec<Product>> {
        Ok(Vec::new())
    }
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_then_get_hides_purchase_price() {
    let app = setup();

    let create_response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/Produits",
            json!({"name": "Widget", "sellingPrice": 20, "purchasePrice": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(create_response.status(), StatusCode::CREATED);
    let location = create_response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, "/Produits/1");

    let get_response = app.oneshot(get_request(&location)).await.unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let product = body_json(get_response).await;
    assert_eq!(product, json!({"id": 1, "name": "Widget", "sellingPrice": 20}));
}

#[tokio::test]
async fn test_create_free_product_is_rejected() {
    let (app, store) = setup_with_store();

    let response = app
        .oneshot(json_request(
            "POST",
            "/Produits",
            json!({"name": "Freebie", "sellingPrice": 0, "purchasePrice": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("free"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_without_selling_price_is_rejected() {
    let (app, store) = setup_with_store();

    let response = app
        .oneshot(json_request("POST", "/Produits", json!({"name": "Nameless price"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_get_nonexistent_product() {
    let app = setup();

    let response = app.oneshot(get_request("/Produits/404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Product 404 not found");
}

#[tokio::test]
async fn test_list_products_hides_purchase_price() {
    let (app, store) = setup_with_store();
    store.save(Product::new("Laptop", 350, 120)).await.unwrap();
    store
        .save(Product::new("Robot vacuum", 500, 200).with_attribute("color", "grey"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/Produits")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products = body_json(response).await;
    assert_eq!(
        products,
        json!([
            {"id": 1, "name": "Laptop", "sellingPrice": 350},
            {"id": 2, "name": "Robot vacuum", "sellingPrice": 500, "color": "grey"}
        ])
    );
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let app = setup();

    let response = app.oneshot(get_request("/Produits")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_update_product() {
    let (app, store) = setup_with_store();
    let saved = store
        .save(Product::new("Widget", 20, 5))
        .await
        .unwrap()
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/Produits",
            json!({"id": saved.id, "name": "Widget XL", "sellingPrice": 30, "purchasePrice": 8}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Widget XL");
    assert_eq!(stored.selling_price, 30);
    assert_eq!(stored.purchase_price, 8);
}

#[tokio::test]
async fn test_update_free_product_is_rejected() {
    let (app, store) = setup_with_store();
    let saved = store
        .save(Product::new("Widget", 20, 5))
        .await
        .unwrap()
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/Produits",
            json!({"id": saved.id, "name": "Widget", "sellingPrice": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = store.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(stored.selling_price, 20);
}

#[tokio::test]
async fn test_delete_product() {
    let (app, store) = setup_with_store();
    let saved = store
        .save(Product::new("Widget", 20, 5))
        .await
        .unwrap()
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/Produits/{}", saved.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.is_empty().await);

    let get_response = app
        .oneshot(get_request(&format!("/Produits/{}", saved.id)))
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_product_is_silent() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/Produits/77")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sorted_products() {
    let (app, store) = setup_with_store();
    for name in ["Orange", "Apple", "Mango"] {
        store.save(Product::new(name, 10, 3)).await.unwrap();
    }

    let response = app.oneshot(get_request("/ProduitsOrdre")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products = body_json(response).await;
    let products = products.as_array().unwrap();
    let names: Vec<_> = products.iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, [json!("Apple"), json!("Mango"), json!("Orange")]);
    assert!(products.iter().all(|p| p.get("purchasePrice").is_none()));
}

#[tokio::test]
async fn test_admin_margins() {
    let (app, store) = setup_with_store();
    store.save(Product::new("P1", 100, 40)).await.unwrap();
    store.save(Product::new("P2", 50, 50)).await.unwrap();

    let response = app.oneshot(get_request("/AdminProduits")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            {"id": 1, "name": "P1", "sellingPrice": 100, "purchasePrice": 40},
            60,
            {"id": 2, "name": "P2", "sellingPrice": 50, "purchasePrice": 50},
            0
        ])
    );
}

#[tokio::test]
async fn test_price_probe_uses_fixed_threshold() {
    let (app, store) = setup_with_store();
    store.save(Product::new("Laptop", 350, 120)).await.unwrap();
    store.save(Product::new("Robot vacuum", 500, 200)).await.unwrap();

    let response = app.oneshot(get_request("/test/produits/10")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{"id": 2, "name": "Robot vacuum", "sellingPrice": 500}])
    );
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4; charset=utf-8"
    );
}

#[tokio::test]
async fn test_create_answers_no_content_when_store_creates_nothing() {
    let state = api::create_default_state(DiscardingStore);
    let app = api::create_app(state, get_metrics_handle());

    let response = app
        .oneshot(json_request(
            "POST",
            "/Produits",
            json!({"name": "Widget", "sellingPrice": 20, "purchasePrice": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_create_after_max_id_answers_no_content() {
    let (app, store) = setup_with_store();

    let update_response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/Produits",
            json!({"id": i32::MAX, "name": "Max", "sellingPrice": 10}),
        ))
        .await
        .unwrap();
    assert_eq!(update_response.status(), StatusCode::OK);

    let create_response = app
        .oneshot(json_request(
            "POST",
            "/Produits",
            json!({"name": "Next", "sellingPrice": 10}),
        ))
        .await
        .unwrap();

    assert_eq!(create_response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_requests_are_counted() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/Produits/31")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let metrics = body_text(app.oneshot(get_request("/metrics")).await.unwrap()).await;
    assert!(metrics.contains("catalog_product_delete_requests_total"));
    assert!(!metrics.contains("catalog_products_deleted_total"));
}
