//! Order line item.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{LineItemId, Money, OrderId, ProductId, Quantity};

/// A line item binding a product to an order.
///
/// The unit price is captured at the moment the item is attached and does not
/// track later product price changes (snapshot semantics). A line item belongs
/// to exactly one order; the order back-reference is set on attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    order_id: OrderId,
    product_id: ProductId,
    unit_price: Money,
    quantity: Quantity,
}

impl LineItem {
    /// Create a new line item bound to an order.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        unit_price: Money,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: LineItemId::generate(),
            order_id,
            product_id,
            unit_price,
            quantity,
        }
    }

    /// Rebuild a line item from stored state.
    #[must_use]
    pub const fn reconstitute(
        id: LineItemId,
        order_id: OrderId,
        product_id: ProductId,
        unit_price: Money,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            order_id,
            product_id,
            unit_price,
            quantity,
        }
    }

    /// Get the line item ID.
    #[must_use]
    pub const fn id(&self) -> &LineItemId {
        &self.id
    }

    /// Get the owning order ID.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Get the referenced product ID.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Get the unit price captured at attach time.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The line's contribution to the order total: `unit_price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Rebind this item to another order.
    ///
    /// Used by the aggregate when attaching supplied items.
    pub(crate) fn bind_to(&mut self, order_id: OrderId) {
        self.order_id = order_id;
    }
}
