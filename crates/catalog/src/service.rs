//! Catalog service providing the product operations.

use common::ProductId;
use product_store::{Product, ProductStore};
use projections::{Projected, project};

use crate::error::CatalogError;
use crate::margin::{MarginReportEntry, margin_report};
use crate::policy::HIDE_PURCHASE_PRICE;

/// Selling price above which [`CatalogService::priced_above`] reports a product.
pub const EXPENSIVE_PRICE_THRESHOLD: i64 = 400;

/// Result of a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The store persisted the product under this id.
    Created { id: ProductId },
    /// The store accepted the call but reported no created record.
    NoContent,
}

/// Service for catalog operations.
///
/// Holds the product store explicitly. Write operations enforce the
/// zero-price rule before touching the store; standard read operations
/// shape their output with [`HIDE_PURCHASE_PRICE`].
pub struct CatalogService<S: ProductStore> {
    store: S,
}

impl<S: ProductStore> CatalogService<S> {
    /// Creates a new catalog service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every product, purchase price hidden.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Projected, CatalogError> {
        let products = self.store.find_all().await?;
        Ok(project(&products, &HIDE_PURCHASE_PRICE)?)
    }

    /// Fetches one product, purchase price hidden.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Projected, CatalogError> {
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound { id })?;
        Ok(project(&product, &HIDE_PURCHASE_PRICE)?)
    }

    /// Persists a new product.
    #[tracing::instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: Product) -> Result<CreateOutcome, CatalogError> {
        ensure_not_free(&product)?;

        let outcome = match self.store.save(product).await? {
            Some(saved) => CreateOutcome::Created { id: saved.id },
            None => CreateOutcome::NoContent,
        };

        metrics::counter!("catalog_products_created_total").increment(1);
        Ok(outcome)
    }

    /// Removes a product. Unknown ids are a silent no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        self.store.delete(id).await?;
        metrics::counter!("catalog_product_delete_requests_total").increment(1);
        Ok(())
    }

    /// Replaces a product, matched by its id.
    #[tracing::instrument(skip(self, product), fields(id = %product.id))]
    pub async fn update(&self, product: Product) -> Result<(), CatalogError> {
        ensure_not_free(&product)?;

        self.store.save(product).await?;
        metrics::counter!("catalog_products_updated_total").increment(1);
        Ok(())
    }

    /// Lists every product ordered by name, purchase price hidden.
    #[tracing::instrument(skip(self))]
    pub async fn sorted_list(&self) -> Result<Projected, CatalogError> {
        let products = self.store.find_all_ordered_by_name_asc().await?;
        Ok(project(&products, &HIDE_PURCHASE_PRICE)?)
    }

    /// Full records interleaved with their margins, over the whole catalog.
    #[tracing::instrument(skip(self))]
    pub async fn margin_report(&self) -> Result<Vec<MarginReportEntry>, CatalogError> {
        let products = self.store.find_all().await?;
        Ok(margin_report(products))
    }

    /// Products priced above [`EXPENSIVE_PRICE_THRESHOLD`].
    ///
    /// The requested price is accepted for route compatibility and ignored;
    /// the threshold is fixed.
    #[tracing::instrument(skip(self))]
    pub async fn priced_above(&self, _requested: i64) -> Result<Projected, CatalogError> {
        let products = self
            .store
            .find_selling_price_above(EXPENSIVE_PRICE_THRESHOLD)
            .await?;
        Ok(project(&products, &HIDE_PURCHASE_PRICE)?)
    }
}

fn ensure_not_free(product: &Product) -> Result<(), CatalogError> {
    if product.is_free() {
        metrics::counter!("catalog_rejected_free_products_total").increment(1);
        return Err(CatalogError::InvalidProduct);
    }
    Ok(())
}
