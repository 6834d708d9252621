//! Application Ports
//!
//! Driven-port interfaces the orchestration layer depends on, plus in-memory
//! implementations for testing and local runs.

pub mod product_directory;
pub mod user_directory;

use thiserror::Error;

pub use product_directory::{InMemoryProductDirectory, Product, ProductDirectoryPort};
pub use user_directory::{InMemoryUserDirectory, User, UserDirectoryPort};

/// Failures raised by directory lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The backing store could not be reached or answered with an error.
    #[error("directory lookup failed: {message}")]
    Lookup {
        /// Error message from the adapter.
        message: String,
    },
}

impl DirectoryError {
    /// Shorthand for a lookup failure.
    #[must_use]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}
