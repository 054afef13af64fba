//! Product entity and the persistence contract behind the catalog.
//!
//! - [`Product`] is the single data model shared by storage and the wire
//! - [`ProductStore`] is the narrow CRUD interface the catalog consults
//! - [`InMemoryProductStore`] and [`PostgresProductStore`] implement it

pub mod error;
pub mod memory;
pub mod postgres;
pub mod product;
pub mod store;

pub use common::ProductId;
pub use error::{Result, StoreError};
pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
pub use product::Product;
pub use store::ProductStore;
