//! Configuration and Wiring

pub mod container;

pub use container::Container;
