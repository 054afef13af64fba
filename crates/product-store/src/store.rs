use async_trait::async_trait;

use crate::{Product, ProductId, Result};

/// Persistence contract consulted by the catalog.
///
/// Implementations own id assignment and ordering; callers make no other
/// assumption about how products are kept. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns every product in store iteration order (ascending id).
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Returns the product with the given id, if any.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Persists a product.
    ///
    /// A product whose id is unassigned receives the next id. A product
    /// carrying an id replaces the stored record with that id, or is
    /// inserted under it when absent. Returns the persisted record, or
    /// `None` when the backend did not create anything (for instance when
    /// no further id can be assigned).
    async fn save(&self, product: Product) -> Result<Option<Product>>;

    /// Removes the product with the given id. Missing ids are ignored.
    async fn delete(&self, id: ProductId) -> Result<()>;

    /// Returns every product ordered by name (byte-wise), ties by id.
    async fn find_all_ordered_by_name_asc(&self) -> Result<Vec<Product>>;

    /// Returns products whose selling price is strictly above `threshold`.
    async fn find_selling_price_above(&self, threshold: i64) -> Result<Vec<Product>>;
}

/// Orders products by name, then id.
pub(crate) fn by_name_then_id(a: &Product, b: &Product) -> std::cmp::Ordering {
    a.name.cmp(&b.name).then(a.id.cmp(&b.id))
}
