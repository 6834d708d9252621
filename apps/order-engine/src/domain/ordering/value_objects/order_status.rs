//! Order status in the fulfilment lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// Orders start in `Pending`. The aggregate itself enforces no transition
/// graph; any status may be assigned from any other. See
/// [`OrderStatusPolicy`](crate::domain::ordering::services::OrderStatusPolicy)
/// for the opt-in transition validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    Pending,
    /// Order confirmed for fulfilment.
    Confirmed,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered to the customer.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the status is conventionally terminal.
    ///
    /// Nothing in the aggregate prevents leaving a terminal status; this
    /// reflects the conventional reading of the lifecycle only.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// All enumerated statuses, in lifecycle order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Pending,
            Self::Confirmed,
            Self::Shipped,
            Self::Delivered,
            Self::Cancelled,
        ]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}
