//! Ordering Domain
//!
//! The Order aggregate, its value objects, repository ports, errors, and the
//! opt-in status lifecycle policy.

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{LineItem, Order, ReconstitutedOrderParams};
pub use errors::OrderError;
pub use repository::{LineItemRepository, OrderRepository};
pub use services::OrderStatusPolicy;
pub use value_objects::OrderStatus;
