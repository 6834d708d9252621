//! User Directory Port (Driven Port)
//!
//! Read-side lookup of user records owned by another context. Order
//! orchestration only needs existence checks and profile reads; user
//! lifecycle management lives elsewhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DirectoryError;
use crate::domain::shared::UserId;

/// User profile snapshot as exposed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Stored credential hash.
    pub password: String,
    /// Shipping address.
    pub address: String,
}

/// Port for user lookups.
#[async_trait]
pub trait UserDirectoryPort: Send + Sync {
    /// Check whether a user exists.
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, DirectoryError>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
}

/// In-memory implementation for testing and local runs.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: std::sync::RwLock<std::collections::HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record.
    pub fn add(&self, user: User) {
        let mut users = self
            .users
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        users.insert(user.id.as_str().to_string(), user);
    }
}

#[async_trait]
impl UserDirectoryPort for InMemoryUserDirectory {
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, DirectoryError> {
        let users = self
            .users
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(users.contains_key(id.as_str()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let users = self
            .users
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(users.get(id.as_str()).cloned())
    }
}
