//! HTTP API server with observability for the product catalog.
//!
//! Provides the product endpoints, the administrative margin report,
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use catalog::CatalogService;
use metrics_exporter_prometheus::PrometheusHandle;
use product_store::ProductStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::products::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: ProductStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/Produits",
            get(routes::products::list::<S>)
                .post(routes::products::create::<S>)
                .put(routes::products::update::<S>),
        )
        .route(
            "/Produits/{id}",
            get(routes::products::get::<S>).delete(routes::products::delete::<S>),
        )
        .route("/ProduitsOrdre", get(routes::products::sorted::<S>))
        .route("/AdminProduits", get(routes::admin::margins::<S>))
        .route(
            "/test/produits/{prix}",
            get(routes::products::priced_above::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around a product store.
pub fn create_default_state<S: ProductStore + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog: CatalogService::new(store),
    })
}
