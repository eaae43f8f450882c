//! `catalog-core`: shared building blocks of the products catalog client.
//!
//! Pure types only: identifiers, the domain error model and the `Entity` seam
//! used by collections that are keyed by identity.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, without};
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
