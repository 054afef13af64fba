//! Projection error types.

use thiserror::Error;

/// Errors that can occur while projecting an entity.
///
/// Policies themselves never fail; the only failure is the source value's
/// own `Serialize` implementation refusing to produce JSON.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The source could not be serialized.
    #[error("Projection serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
