//! Shared Domain Types
//!
//! Value objects and errors shared across the domain.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{LineItemId, Money, OrderId, ProductId, Quantity, Timestamp, UserId};
