//! Administrative endpoints exposing internal cost data.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::MarginReportEntry;
use product_store::ProductStore;

use super::products::AppState;
use crate::error::ApiError;

/// GET /AdminProduits: every product followed by its margin, full fields.
#[tracing::instrument(skip(state))]
pub async fn margins<S: ProductStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<MarginReportEntry>>, ApiError> {
    Ok(Json(state.catalog.margin_report().await?))
}
