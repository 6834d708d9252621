// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Engine - Order Management Core Library
//!
//! Order orchestration for an e-commerce storefront: order creation, line-item
//! management, derived totals, status assignment, and order queries.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, ports)
//!   - `ordering`: Order aggregate, line items, status, repository traits
//!   - `shared`: Identifiers, money, quantity, timestamps
//!
//! - **Application**: Orchestration and driven ports
//!   - `ports`: User and product directories (`UserDirectoryPort`, `ProductDirectoryPort`)
//!   - `services`: `OrderService` coordinating repositories and directories
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory order and line-item repositories
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Orchestration services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and wiring.
pub mod infrastructure;

/// Tracing and OpenTelemetry setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::ordering::{
    LineItem, LineItemRepository, Order, OrderError, OrderRepository, OrderStatus,
    OrderStatusPolicy, ReconstitutedOrderParams,
};
pub use domain::shared::{
    DomainError, LineItemId, Money, OrderId, ProductId, Quantity, Timestamp, UserId,
};

// Application re-exports
pub use application::ports::{
    DirectoryError, InMemoryProductDirectory, InMemoryUserDirectory, Product,
    ProductDirectoryPort, User, UserDirectoryPort,
};
pub use application::services::{LineItemDraft, OrderDraft, OrderService};

// Infrastructure re-exports
pub use infrastructure::config::Container;
pub use infrastructure::persistence::{InMemoryLineItemRepository, InMemoryOrderRepository};
