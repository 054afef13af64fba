//! Shared types for the product catalog.

pub mod types;

pub use types::ProductId;
