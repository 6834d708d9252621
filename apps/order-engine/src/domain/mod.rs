//! Domain Layer
//!
//! Pure business logic: aggregates, value objects, domain services, and
//! repository ports. No dependencies on the application or infrastructure
//! layers.

pub mod ordering;
pub mod shared;
