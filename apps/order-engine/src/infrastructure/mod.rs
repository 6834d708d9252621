//! Infrastructure Layer
//!
//! Adapters implementing the domain and application ports, plus wiring.

pub mod config;
pub mod persistence;
