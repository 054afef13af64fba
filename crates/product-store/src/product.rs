//! The catalog product record.

use common::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog product.
///
/// The same type is used for request payloads, storage and responses.
/// Client-facing views hide `purchasePrice` through a projection policy
/// instead of a second output type.
///
/// Serialized keys are camelCase and appear in declaration order, followed
/// by any additional descriptive attributes the client supplied. Missing
/// declared fields fall back to their defaults, so a payload without
/// `sellingPrice` carries a zero selling price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Price shown to customers.
    #[serde(default)]
    pub selling_price: i64,
    /// Internal cost; hidden on standard read paths.
    #[serde(default)]
    pub purchase_price: i64,
    /// Free-form descriptive fields (e.g. `description`, `category`).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Creates an unsaved product with the given name and prices.
    pub fn new(name: impl Into<String>, selling_price: i64, purchase_price: i64) -> Self {
        Self {
            id: ProductId::UNASSIGNED,
            name: name.into(),
            selling_price,
            purchase_price,
            attributes: Map::new(),
        }
    }

    /// Returns a copy of this product carrying the given id.
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = id;
        self
    }

    /// Adds a descriptive attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns true when the selling price is zero.
    pub fn is_free(&self) -> bool {
        self.selling_price == 0
    }

    /// Selling price minus purchase price.
    pub fn margin(&self) -> i64 {
        self.selling_price.saturating_sub(self.purchase_price)
    }
}
