//! Quantity value object for line-item quantities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A whole-unit quantity for order line items.
///
/// Quantities are counts of discrete products; a line item is only valid
/// with a quantity of at least one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Create a new Quantity.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Zero quantity. Never valid on a line item; useful as a sentinel.
    pub const ZERO: Self = Self(0);

    /// Get the inner value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns true if this quantity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Validate quantity for attachment to an order.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is less than one.
    pub fn validate_for_line_item(&self) -> Result<(), DomainError> {
        if self.0 < 1 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: "Line item quantity must be at least one".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}
