//! Field projection for client-visible views.
//!
//! A single entity type is serialized once and shaped per call site:
//! - [`ProjectionPolicy`] names the fields a view must omit
//! - [`project`] applies a policy to an entity or an ordered collection
//! - [`Projected`] carries the shaped output to the response layer

pub mod error;
pub mod policy;
pub mod projection;

pub use error::{ProjectionError, Result};
pub use policy::ProjectionPolicy;
pub use projection::{Projected, project};
