//! Persistence accessor for menu items, orders and order lines.
//!
//! Two interchangeable backends implement [`ItemStore`] and [`OrderStore`]:
//! [`PostgresStore`] for production and [`InMemoryStore`] for tests and
//! local experiments.

pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;

pub use common::{ItemId, Money, OrderId, OrderItemId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use model::{DEFAULT_STATUS, Item, ItemFields, LineItem, Order, OrderDraft, OrderItem};
pub use postgres::PostgresStore;
pub use store::{ItemStore, OrderStore};
