//! Projection policies used by the catalog read paths.

use projections::ProjectionPolicy;

/// Client-facing view: every product field except the internal cost.
pub const HIDE_PURCHASE_PRICE: ProjectionPolicy =
    ProjectionPolicy::serialize_all_except("hidePurchasePrice", &["purchasePrice"]);
