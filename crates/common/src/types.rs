use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Ids are assigned by the product store. The default value `0` marks a
/// product that has not been persisted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    /// The id carried by products the store has not assigned yet.
    pub const UNASSIGNED: ProductId = ProductId(0);

    /// Creates a product ID from a raw integer.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn as_i32(&self) -> i32 {
        self.0
    }

    /// Returns true when the store has assigned this id.
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i32 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
