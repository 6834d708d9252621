//! Ordering Aggregates

pub mod line_item;
pub mod order;

pub use line_item::LineItem;
pub use order::{Order, ReconstitutedOrderParams};
