use async_trait::async_trait;

use crate::{Item, ItemFields, ItemId, OrderDraft, OrderId, Result, model::Order};

/// Single-table access to the menu.
///
/// Callers validate fields before reaching this layer; constraint violations
/// that slip through surface as [`StoreError::Database`](crate::StoreError::Database).
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Lists every menu item ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Fetches one item, failing with `NotFound` if it does not exist.
    async fn get_item(&self, id: ItemId) -> Result<Item>;

    /// Inserts a new item and returns it with its generated id.
    async fn create_item(&self, fields: ItemFields) -> Result<Item>;

    /// Overwrites every writable column of an existing item.
    async fn update_item(&self, id: ItemId, fields: ItemFields) -> Result<Item>;

    /// Deletes an item.
    ///
    /// Fails with `NotFound` when nothing was deleted and with `ItemInUse`
    /// when order lines still reference it.
    async fn delete_item(&self, id: ItemId) -> Result<()>;
}

/// Transactional access to orders and their lines.
///
/// Every write touches the header and its lines atomically: either all rows
/// of the operation are visible afterwards or none are.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a header and all of its lines, returning the generated order id.
    async fn insert_order(&self, draft: OrderDraft) -> Result<OrderId>;

    /// Fetches a header with its lines in insertion order.
    async fn get_order(&self, id: OrderId) -> Result<Order>;

    /// Lists all orders, most recent first, each with its lines.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Updates the header and replaces the full set of lines.
    async fn replace_order(&self, id: OrderId, draft: OrderDraft) -> Result<()>;

    /// Deletes the lines and then the header.
    async fn delete_order(&self, id: OrderId) -> Result<()>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
