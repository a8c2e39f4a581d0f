//! Domain error types.

use common::ItemId;
use store::StoreError;
use thiserror::Error;

/// Input rejected before any storage is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Item name is empty.
    #[error("Item name is required")]
    NameRequired,

    /// Item price must be strictly positive.
    #[error("Item price must be greater than 0 (got {price})")]
    InvalidPrice { price: common::Money },

    /// Order subtotal cannot be negative.
    #[error("Subtotal cannot be negative (got {subtotal})")]
    NegativeSubtotal { subtotal: common::Money },

    /// Order line quantity must be positive.
    #[error("Invalid quantity {quantity} for item {item_id} (must be greater than 0)")]
    InvalidQuantity { item_id: ItemId, quantity: i32 },

    /// Order line price cannot be negative.
    #[error("Price for item {item_id} cannot be negative")]
    NegativeLinePrice { item_id: ItemId },

    /// Status was supplied but blank.
    #[error("Status cannot be empty")]
    EmptyStatus,

    /// An order line references a menu item that does not exist.
    #[error("Item {0} does not exist")]
    UnknownItem(ItemId),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller supplied invalid input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested order or item does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The menu item cannot be removed while orders reference it.
    #[error("Item {0} is referenced by existing orders")]
    ItemInUse(ItemId),

    /// Any other persistence failure, including failed transactions.
    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => DomainError::NotFound { entity, id },
            StoreError::ItemInUse(id) => DomainError::ItemInUse(id),
            StoreError::UnknownItem(id) => DomainError::Validation(ValidationError::UnknownItem(id)),
            other => DomainError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err: DomainError = StoreError::NotFound {
            entity: "Order",
            id: 3,
        }
        .into();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "Order",
                id: 3
            }
        ));
        assert_eq!(err.to_string(), "Order 3 not found");
    }

    #[test]
    fn unknown_item_is_a_validation_error() {
        let err: DomainError = StoreError::UnknownItem(ItemId::new(8)).into();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::UnknownItem(_))
        ));
    }

    #[test]
    fn database_errors_are_storage_errors() {
        let err: DomainError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
