//! Shared types for the pizza shop backend.

pub mod ids;
pub mod money;

pub use ids::{ItemId, OrderId, OrderItemId};
pub use money::{Money, MoneyError};
