//! Product Directory Port (Driven Port)
//!
//! Read-side lookup of catalog products. Orchestration reads the current
//! price when attaching a product to an order; catalog management lives
//! elsewhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DirectoryError;
use crate::domain::shared::{Money, ProductId};

/// Catalog product snapshot as exposed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Catalog description.
    pub description: String,
    /// Current catalog price.
    pub price: Money,
    /// Units on hand.
    pub stock_quantity: u32,
}

/// Port for product lookups.
#[async_trait]
pub trait ProductDirectoryPort: Send + Sync {
    /// Find a product by ID.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DirectoryError>;
}

/// In-memory implementation for testing and local runs.
#[derive(Debug, Default)]
pub struct InMemoryProductDirectory {
    products: std::sync::RwLock<std::collections::HashMap<String, Product>>,
}

impl InMemoryProductDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product record.
    pub fn add(&self, product: Product) {
        let mut products = self
            .products
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        products.insert(product.id.as_str().to_string(), product);
    }
}

#[async_trait]
impl ProductDirectoryPort for InMemoryProductDirectory {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DirectoryError> {
        let products = self
            .products
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(products.get(id.as_str()).cloned())
    }
}
