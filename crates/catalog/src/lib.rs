//! Catalog operations.
//!
//! This crate combines store access with the catalog's business rule and
//! selects the response shape for each operation:
//! - [`CatalogService`] for list, get, create, update, delete and the
//!   derived views
//! - [`HIDE_PURCHASE_PRICE`], the projection policy of the standard read paths
//! - [`MarginReportEntry`] for the administrative margin report

pub mod error;
pub mod margin;
pub mod policy;
pub mod service;

pub use error::CatalogError;
pub use margin::{MarginReportEntry, margin_report};
pub use policy::HIDE_PURCHASE_PRICE;
pub use service::{CatalogService, CreateOutcome, EXPENSIVE_PRICE_THRESHOLD};
