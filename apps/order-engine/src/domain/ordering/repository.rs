//! Ordering Repository Traits
//!
//! Persistence abstractions for orders and line items.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::{LineItem, Order};
use super::errors::OrderError;
use crate::domain::shared::{OrderId, ProductId, Timestamp, UserId};

/// Repository trait for Order persistence.
///
/// This is a domain interface (port) that is implemented by
/// infrastructure adapters (SQL, in-memory, etc.).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update) and return the stored state.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<Order, OrderError>;

    /// Find an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Find all orders.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Find all orders placed by a user.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError>;

    /// Find all orders placed within `[start, end]`, both bounds inclusive.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, OrderError>;

    /// Delete an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if deletion fails.
    async fn delete_by_id(&self, id: &OrderId) -> Result<(), OrderError>;

    /// Check if an order exists.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn exists_by_id(&self, id: &OrderId) -> Result<bool, OrderError>;
}

/// Repository trait for LineItem persistence.
///
/// Line items are also reachable through their owning order; this port exists
/// for adapters that store them in a separate table and for product-centric
/// queries.
#[async_trait]
pub trait LineItemRepository: Send + Sync {
    /// Save a line item (insert or update) and return the stored state.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, item: &LineItem) -> Result<LineItem, OrderError>;

    /// Find all line items belonging to an order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Vec<LineItem>, OrderError>;

    /// Find all line items referencing a product, across orders.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_product_id(&self, product_id: &ProductId)
    -> Result<Vec<LineItem>, OrderError>;

    /// Delete all line items belonging to an order.
    ///
    /// # Errors
    ///
    /// Returns error if deletion fails.
    async fn delete_by_order_id(&self, order_id: &OrderId) -> Result<(), OrderError>;

    /// Delete all line items referencing a product.
    ///
    /// # Errors
    ///
    /// Returns error if deletion fails.
    async fn delete_by_product_id(&self, product_id: &ProductId) -> Result<(), OrderError>;
}
