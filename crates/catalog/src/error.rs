//! Catalog error types.

use common::ProductId;
use product_store::StoreError;
use projections::ProjectionError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with the requested id.
    #[error("Product {id} not found")]
    NotFound { id: ProductId },

    /// A product with a zero selling price was submitted for writing.
    #[error("Invalid product: a product cannot be free")]
    InvalidProduct,

    /// An error occurred in the product store.
    #[error("Product store error: {0}")]
    Store(#[from] StoreError),

    /// The response view could not be produced.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}
