//! Ordering Domain Services

pub mod status_policy;

pub use status_policy::OrderStatusPolicy;
