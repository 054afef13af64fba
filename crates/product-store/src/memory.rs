use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{ProductStore, by_name_then_id};
use crate::{Product, ProductId, Result};

#[derive(Default)]
struct Inner {
    products: BTreeMap<ProductId, Product>,
    last_id: i32,
}

/// In-memory product store.
///
/// Keeps products in a map keyed by id and hands out ids sequentially,
/// mirroring the behavior of the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProductStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    /// Returns true when no product is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.products.is_empty()
    }

    /// Removes every product and resets id assignment.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.products.clear();
        inner.last_id = 0;
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> Result<Option<Product>> {
        let mut inner = self.inner.write().await;

        if product.id.is_assigned() {
            inner.last_id = inner.last_id.max(product.id.as_i32());
        } else {
            let Some(next_id) = inner.last_id.checked_add(1) else {
                tracing::warn!(last_id = inner.last_id, "product id space exhausted");
                return Ok(None);
            };
            inner.last_id = next_id;
            product.id = ProductId::new(next_id);
        }

        tracing::debug!(id = %product.id, "saving product");
        inner.products.insert(product.id, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.products.remove(&id).is_none() {
            tracing::debug!(%id, "delete of unknown product ignored");
        }
        Ok(())
    }

    async fn find_all_ordered_by_name_asc(&self) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products: Vec<_> = inner.products.values().cloned().collect();
        products.sort_by(by_name_then_id);
        Ok(products)
    }

    async fn find_selling_price_above(&self, threshold: i64) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .values()
            .filter(|p| p.selling_price > threshold)
            .cloned()
            .collect())
    }
}
