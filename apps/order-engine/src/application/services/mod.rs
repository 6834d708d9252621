//! Application Services

pub mod order_service;

pub use order_service::{LineItemDraft, OrderDraft, OrderService};
