//! Product CRUD and catalog view endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use catalog::{CatalogService, CreateOutcome};
use common::ProductId;
use product_store::{Product, ProductStore};
use projections::Projected;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: ProductStore> {
    pub catalog: CatalogService<S>,
}

/// GET /Produits: list all products without their purchase price.
#[tracing::instrument(skip(state))]
pub async fn list<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Projected>, ApiError> {
    Ok(Json(state.catalog.list().await?))
}

/// GET /Produits/{id}: fetch one product without its purchase price.
#[tracing::instrument(skip(state))]
pub async fn get<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ProductId>,
) -> Result<Json<Projected>, ApiError> {
    Ok(Json(state.catalog.get(id).await?))
}

/// POST /Produits: create a product.
///
/// Responds `201 Created` with a `Location` pointing at the new product, or
/// `204 No Content` when the store created nothing.
#[tracing::instrument(skip(state, uri, product))]
pub async fn create<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    OriginalUri(uri): OriginalUri,
    Json(product): Json<Product>,
) -> Result<Response, ApiError> {
    match state.catalog.create(product).await? {
        CreateOutcome::Created { id } => {
            let location = format!("{}/{id}", uri.path().trim_end_matches('/'));
            let location = HeaderValue::from_str(&location)
                .map_err(|e| ApiError::Internal(format!("Invalid location header: {e}")))?;
            Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
        }
        CreateOutcome::NoContent => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// DELETE /Produits/{id}: remove a product; unknown ids are ignored.
#[tracing::instrument(skip(state))]
pub async fn delete<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::OK)
}

/// PUT /Produits: replace a product matched by the id in the body.
#[tracing::instrument(skip(state, product))]
pub async fn update<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(product): Json<Product>,
) -> Result<StatusCode, ApiError> {
    state.catalog.update(product).await?;
    Ok(StatusCode::OK)
}

/// GET /ProduitsOrdre: list all products sorted by name.
#[tracing::instrument(skip(state))]
pub async fn sorted<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Projected>, ApiError> {
    Ok(Json(state.catalog.sorted_list().await?))
}

/// GET /test/produits/{prix}: products above the fixed price threshold.
#[tracing::instrument(skip(state))]
pub async fn priced_above<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(price): Path<i64>,
) -> Result<Json<Projected>, ApiError> {
    Ok(Json(state.catalog.priced_above(price).await?))
}
