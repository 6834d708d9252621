//! In-memory repositories for testing and local runs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ordering::aggregate::{LineItem, Order};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::{LineItemRepository, OrderRepository};
use crate::domain::shared::{OrderId, ProductId, Timestamp, UserId};

/// In-memory implementation of `LineItemRepository`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryLineItemRepository {
    items: RwLock<HashMap<String, LineItem>>,
}

impl InMemoryLineItemRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Clear all line items.
    pub fn clear(&self) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn replace_for_order(&self, order_id: &OrderId, items: &[LineItem]) {
        let mut store = self.items.write().unwrap_or_else(PoisonError::into_inner);
        store.retain(|_, i| i.order_id() != order_id);
        for item in items {
            store.insert(item.id().as_str().to_string(), item.clone());
        }
    }
}

#[async_trait]
impl LineItemRepository for InMemoryLineItemRepository {
    async fn save(&self, item: &LineItem) -> Result<LineItem, OrderError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(item.id().as_str().to_string(), item.clone());
        Ok(item.clone())
    }

    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Vec<LineItem>, OrderError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items
            .values()
            .filter(|i| i.order_id() == order_id)
            .cloned()
            .collect())
    }

    async fn find_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<LineItem>, OrderError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items
            .values()
            .filter(|i| i.product_id() == product_id)
            .cloned()
            .collect())
    }

    async fn delete_by_order_id(&self, order_id: &OrderId) -> Result<(), OrderError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.retain(|_, i| i.order_id() != order_id);
        Ok(())
    }

    async fn delete_by_product_id(&self, product_id: &ProductId) -> Result<(), OrderError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.retain(|_, i| i.product_id() != product_id);
        Ok(())
    }
}

/// In-memory implementation of `OrderRepository`.
///
/// Owns a handle to the line-item store and keeps it in sync with the
/// embedded collections: saving an order replaces its stored items, and
/// deleting an order removes them. Suitable for testing and development.
#[derive(Debug)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
    line_items: Arc<InMemoryLineItemRepository>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository backed by the given line-item store.
    #[must_use]
    pub fn new(line_items: Arc<InMemoryLineItemRepository>) -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            line_items,
        }
    }

    /// Get the number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Clear all orders.
    pub fn clear(&self) {
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Add an order to the repository (for test setup).
    pub fn add(&self, order: Order) {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.insert(order.id().as_str().to_string(), order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<Order, OrderError> {
        self.line_items
            .replace_for_order(order.id(), order.line_items());
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.insert(order.id().as_str().to_string(), order.clone());
        Ok(order.clone())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.get(id.as_str()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.values().cloned().collect())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders
            .values()
            .filter(|o| o.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders
            .values()
            .filter(|o| o.ordered_at() >= start && o.ordered_at() <= end)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: &OrderId) -> Result<(), OrderError> {
        self.line_items.delete_by_order_id(id).await?;
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.remove(id.as_str());
        Ok(())
    }

    async fn exists_by_id(&self, id: &OrderId) -> Result<bool, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.contains_key(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{Money, Quantity};

    fn repos() -> (InMemoryOrderRepository, Arc<InMemoryLineItemRepository>) {
        let items = Arc::new(InMemoryLineItemRepository::new());
        (InMemoryOrderRepository::new(Arc::clone(&items)), items)
    }

    fn make_order(user: &str) -> Order {
        Order::new(UserId::new(user), Timestamp::now())
    }

    #[tokio::test]
    async fn save_and_find() {
        let (orders, _) = repos();
        let order = make_order("user-1");
        let id = order.id().clone();

        orders.save(&order).await.unwrap();

        let found = orders.find_by_id(&id).await.unwrap();
        assert_eq!(found.unwrap().id(), &id);
    }

    #[tokio::test]
    async fn save_syncs_line_items() {
        let (orders, items) = repos();
        let mut order = make_order("user-1");
        order
            .add_line_item(
                ProductId::new("prod-1"),
                Money::from_cents(1000),
                Quantity::new(2),
            )
            .unwrap();

        orders.save(&order).await.unwrap();
        assert_eq!(items.len(), 1);

        order.remove_line_item(&ProductId::new("prod-1"));
        orders.save(&order).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn find_by_user_filters() {
        let (orders, _) = repos();
        orders.save(&make_order("user-1")).await.unwrap();
        orders.save(&make_order("user-1")).await.unwrap();
        orders.save(&make_order("user-2")).await.unwrap();

        let mine = orders.find_by_user(&UserId::new("user-1")).await.unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn find_by_date_range_includes_bounds() {
        let (orders, _) = repos();
        let at = Timestamp::parse("2026-02-10T08:30:00Z").unwrap();
        let order = Order::new(UserId::new("user-1"), at);
        orders.save(&order).await.unwrap();

        let hits = orders.find_by_date_range(at, at).await.unwrap();
        assert_eq!(hits.len(), 1);

        let later = Timestamp::parse("2026-02-11T00:00:00Z").unwrap();
        let misses = orders.find_by_date_range(later, later).await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_to_line_items() {
        let (orders, items) = repos();
        let mut order = make_order("user-1");
        order
            .add_line_item(
                ProductId::new("prod-1"),
                Money::from_cents(1000),
                Quantity::new(1),
            )
            .unwrap();
        let id = order.id().clone();
        orders.save(&order).await.unwrap();

        orders.delete_by_id(&id).await.unwrap();

        assert!(!orders.exists_by_id(&id).await.unwrap());
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn line_item_queries_by_product() {
        let (orders, items) = repos();
        let mut order = make_order("user-1");
        order
            .add_line_item(
                ProductId::new("prod-1"),
                Money::from_cents(1000),
                Quantity::new(1),
            )
            .unwrap();
        order
            .add_line_item(
                ProductId::new("prod-2"),
                Money::from_cents(500),
                Quantity::new(1),
            )
            .unwrap();
        orders.save(&order).await.unwrap();

        let matches = items
            .find_by_product_id(&ProductId::new("prod-1"))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);

        items
            .delete_by_product_id(&ProductId::new("prod-1"))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }
}
