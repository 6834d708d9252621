//! Order Status Policy Service
//!
//! Opt-in validator for the conventional fulfilment lifecycle. The orchestration
//! service does NOT consult this policy: `update_order_status` accepts any
//! enumerated status from any current status. Callers that want the lifecycle
//! enforced can run the policy before assigning.

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::value_objects::OrderStatus;

/// Validator for the conventional order lifecycle.
///
/// Pending -> Confirmed -> Shipped -> Delivered, with cancellation allowed
/// until shipping.
pub struct OrderStatusPolicy;

impl OrderStatusPolicy {
    /// Check if a status transition follows the conventional lifecycle.
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            // From Pending
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                // From Confirmed
                | (OrderStatus::Confirmed, OrderStatus::Shipped)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
                // From Shipped
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    /// Validate a status transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition leaves the conventional lifecycle.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStatusTransition { from, to })
        }
    }

    /// Get all statuses reachable from a given status.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        match from {
            OrderStatus::Pending => vec![OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => vec![OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => vec![OrderStatus::Delivered],
            // Terminal states
            OrderStatus::Delivered | OrderStatus::Cancelled => vec![],
        }
    }
}
