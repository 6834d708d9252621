//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{ProductDirectoryPort, UserDirectoryPort};
use crate::application::services::OrderService;
use crate::domain::ordering::repository::{LineItemRepository, OrderRepository};

/// Dependency injection container.
///
/// Holds all wired dependencies for the application. Construct with the
/// concrete adapters for the target environment.
pub struct Container<O, L, U, P>
where
    O: OrderRepository + 'static,
    L: LineItemRepository + 'static,
    U: UserDirectoryPort + 'static,
    P: ProductDirectoryPort + 'static,
{
    // Ports
    orders: Arc<O>,
    line_items: Arc<L>,
    users: Arc<U>,
    products: Arc<P>,
}

impl<O, L, U, P> Container<O, L, U, P>
where
    O: OrderRepository + 'static,
    L: LineItemRepository + 'static,
    U: UserDirectoryPort + 'static,
    P: ProductDirectoryPort + 'static,
{
    /// Create a new container with all dependencies.
    pub fn new(orders: Arc<O>, line_items: Arc<L>, users: Arc<U>, products: Arc<P>) -> Self {
        Self {
            orders,
            line_items,
            users,
            products,
        }
    }

    /// Get the order repository.
    pub fn orders(&self) -> Arc<O> {
        Arc::clone(&self.orders)
    }

    /// Get the line-item repository.
    pub fn line_items(&self) -> Arc<L> {
        Arc::clone(&self.line_items)
    }

    /// Get the user directory port.
    pub fn users(&self) -> Arc<U> {
        Arc::clone(&self.users)
    }

    /// Get the product directory port.
    pub fn products(&self) -> Arc<P> {
        Arc::clone(&self.products)
    }

    /// Create an `OrderService` wired to the container's ports.
    pub fn order_service(&self) -> OrderService<O, L, U, P> {
        OrderService::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.line_items),
            Arc::clone(&self.users),
            Arc::clone(&self.products),
        )
    }
}
