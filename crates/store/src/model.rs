//! Row-level records and write drafts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{ItemId, Money, OrderId, OrderItemId};

/// Status assigned to every newly created order.
pub const DEFAULT_STATUS: &str = "pending";

/// A menu item as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Money,
}

/// The writable columns of a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Money,
}

impl ItemFields {
    pub(crate) fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
        }
    }
}

/// An order header together with its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: String,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// One order line, with the menu item's name joined in at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: i32,
    pub price_at_order: Money,
}

/// A line to be written for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: ItemId,
    pub quantity: i32,
    pub price_at_order: Money,
}

/// Everything needed to write an order header and its full set of lines.
///
/// The store writes amounts verbatim; deriving tax and total is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    /// `None` keeps the stored status on update and means [`DEFAULT_STATUS`] on insert.
    pub status: Option<String>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub items: Vec<LineItem>,
}

impl OrderDraft {
    pub(crate) fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }
}
