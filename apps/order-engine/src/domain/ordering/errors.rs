//! Ordering errors.

use std::fmt;

use super::value_objects::OrderStatus;

/// Errors that can occur in order management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A precondition on the input failed.
    Validation {
        /// Field with the invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// A referenced entity does not exist.
    NotFound {
        /// Entity kind ("order", "user", "product").
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A status transition rejected by the optional lifecycle policy.
    InvalidStatusTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
    },

    /// A storage port failed.
    Storage {
        /// Error message from the adapter.
        message: String,
    },
}

impl OrderError {
    /// Shorthand for a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::NotFound { entity, id } => {
                write!(f, "{entity} not found: {id}")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid order status transition: {from} -> {to}")
            }
            Self::Storage { message } => {
                write!(f, "Storage failure: {message}")
            }
        }
    }
}

impl std::error::Error for OrderError {}
