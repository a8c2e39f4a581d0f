//! Order commands.

use common::{Money, OrderId};
use store::LineItem;

use crate::error::ValidationError;

/// Command to place a new order.
///
/// Tax, total and status are not part of the command: the workflow derives
/// them regardless of what the client sent.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub subtotal: Money,
    pub items: Vec<LineItem>,
}

impl PlaceOrder {
    /// Creates a new PlaceOrder command.
    pub fn new(
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        subtotal: Money,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            subtotal,
            items,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_amounts(self.subtotal, &self.items)
    }
}

/// Command to overwrite an order's header and replace all of its lines.
#[derive(Debug, Clone)]
pub struct ReviseOrder {
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    /// New status; `None` keeps the current one.
    pub status: Option<String>,
    pub subtotal: Money,
    pub items: Vec<LineItem>,
}

impl ReviseOrder {
    /// Creates a new ReviseOrder command that keeps the current status.
    pub fn new(
        order_id: OrderId,
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        subtotal: Money,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            status: None,
            subtotal,
            items,
        }
    }

    /// Sets the new status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Some(status) = &self.status
            && status.trim().is_empty()
        {
            return Err(ValidationError::EmptyStatus);
        }
        validate_amounts(self.subtotal, &self.items)
    }
}

fn validate_amounts(subtotal: Money, items: &[LineItem]) -> Result<(), ValidationError> {
    if subtotal.is_negative() {
        return Err(ValidationError::NegativeSubtotal { subtotal });
    }
    for line in items {
        if line.quantity <= 0 {
            return Err(ValidationError::InvalidQuantity {
                item_id: line.item_id,
                quantity: line.quantity,
            });
        }
        if line.price_at_order.is_negative() {
            return Err(ValidationError::NegativeLinePrice {
                item_id: line.item_id,
            });
        }
    }
    Ok(())
}
