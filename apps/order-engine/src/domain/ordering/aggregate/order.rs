//! Order Aggregate Root
//!
//! The Order aggregate owns the ordered line-item collection and guarantees
//! that the total amount always equals the sum of line subtotals.

use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::{Money, OrderId, ProductId, Quantity, Timestamp, UserId};

/// Parameters for reconstituting an Order from storage.
///
/// Used by repositories to rebuild aggregates from persisted state; creation
/// validation is not re-run.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// When the order was placed.
    pub ordered_at: Timestamp,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Persisted line items, in attach order.
    pub line_items: Vec<LineItem>,
}

/// Order Aggregate Root.
///
/// The total amount is a pure derived value: it is recomputed from the live
/// line-item collection on every structural change, never patched
/// incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    ordered_at: Timestamp,
    status: OrderStatus,
    line_items: Vec<LineItem>,
    total_amount: Money,
}

impl Order {
    /// Create a new order for a user.
    ///
    /// The order starts in `Pending` status with no line items and a zero
    /// total.
    #[must_use]
    pub fn new(user_id: UserId, ordered_at: Timestamp) -> Self {
        Self {
            id: OrderId::generate(),
            user_id,
            ordered_at,
            status: OrderStatus::Pending,
            line_items: Vec::new(),
            total_amount: Money::ZERO,
        }
    }

    /// Reconstitute an order from stored state.
    ///
    /// The total is recomputed from the supplied items so a stale stored
    /// total can never diverge from the collection.
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        let mut order = Self {
            id: params.id,
            user_id: params.user_id,
            ordered_at: params.ordered_at,
            status: params.status,
            line_items: params.line_items,
            total_amount: Money::ZERO,
        };
        order.recalculate_total();
        order
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the owning user ID.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the order timestamp.
    #[must_use]
    pub const fn ordered_at(&self) -> Timestamp {
        self.ordered_at
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the line items, in attach order.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Get the derived total amount.
    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Check if the order has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a line item for a product, snapshotting the given unit price.
    ///
    /// Recalculates the total on success.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the quantity is less than one; the
    /// aggregate (including the total) is left unchanged.
    pub fn add_line_item(
        &mut self,
        product_id: ProductId,
        unit_price: Money,
        quantity: Quantity,
    ) -> Result<(), OrderError> {
        quantity
            .validate_for_line_item()
            .map_err(|e| OrderError::validation("quantity", e.to_string()))?;

        self.line_items.push(LineItem::new(
            self.id.clone(),
            product_id,
            unit_price,
            quantity,
        ));
        self.recalculate_total();
        Ok(())
    }

    /// Attach an already-built line item, rebinding it to this order.
    ///
    /// Recalculates the total on success.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the item's quantity is less than one.
    pub fn attach_line_item(&mut self, mut item: LineItem) -> Result<(), OrderError> {
        item.quantity()
            .validate_for_line_item()
            .map_err(|e| OrderError::validation("quantity", e.to_string()))?;

        item.bind_to(self.id.clone());
        self.line_items.push(item);
        self.recalculate_total();
        Ok(())
    }

    /// Remove every line item referencing the given product.
    ///
    /// Removing a product that is not present is a no-op, not an error.
    /// Recalculates the total afterwards.
    pub fn remove_line_item(&mut self, product_id: &ProductId) {
        self.line_items.retain(|item| item.product_id() != product_id);
        self.recalculate_total();
    }

    /// Unconditionally assign a new status.
    ///
    /// The aggregate enforces no transition graph; any enumerated status is
    /// accepted from any current status. See
    /// [`OrderStatusPolicy`](crate::domain::ordering::services::OrderStatusPolicy)
    /// for the opt-in lifecycle validator.
    pub const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Recompute the total as the fresh sum of line subtotals.
    fn recalculate_total(&mut self) {
        self.total_amount = self
            .line_items
            .iter()
            .fold(Money::ZERO, |acc, item| acc + item.subtotal());
    }
}
