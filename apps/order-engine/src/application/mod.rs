//! Application Layer
//!
//! Orchestration services and the driven ports they depend on. Depends on
//! the domain layer only.

pub mod ports;
pub mod services;
