use thiserror::Error;

use crate::{ItemId, OrderId};

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the requested id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The menu item is still referenced by at least one order line.
    #[error("Item {0} is referenced by existing orders")]
    ItemInUse(ItemId),

    /// An order line referenced a menu item that does not exist.
    #[error("Item {0} does not exist")]
    UnknownItem(ItemId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub(crate) fn item_not_found(id: ItemId) -> Self {
        StoreError::NotFound {
            entity: "Item",
            id: id.as_i64(),
        }
    }

    pub(crate) fn order_not_found(id: OrderId) -> Self {
        StoreError::NotFound {
            entity: "Order",
            id: id.as_i64(),
        }
    }

    /// Returns true if this error means the requested row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
