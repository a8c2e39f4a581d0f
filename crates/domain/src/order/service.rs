//! Order service providing the transactional order workflow.

use common::OrderId;
use store::{DEFAULT_STATUS, Order, OrderDraft, OrderStore};

use crate::error::DomainError;

use super::{OrderTotals, PlaceOrder, ReviseOrder};

/// Service for managing orders.
///
/// Derives tax and total from the subtotal on every write and delegates
/// atomicity of the header-plus-lines write to the store.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Places an order with status `pending` and server-computed totals.
    #[tracing::instrument(skip(self, cmd), fields(lines = cmd.items.len()))]
    pub async fn create_order(&self, cmd: PlaceOrder) -> Result<OrderId, DomainError> {
        cmd.validate()?;

        let totals = OrderTotals::from_subtotal(cmd.subtotal);
        let line_count = cmd.items.len();
        let draft = OrderDraft {
            customer_name: cmd.customer_name,
            customer_phone: cmd.customer_phone,
            status: Some(DEFAULT_STATUS.to_string()),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            items: cmd.items,
        };

        let order_id = self.store.insert_order(draft).await?;

        metrics::counter!("orders_created_total").increment(1);
        metrics::histogram!("order_line_items").record(line_count as f64);
        tracing::info!(%order_id, total = %totals.total, "order created");
        Ok(order_id)
    }

    /// Loads an order with its lines.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, DomainError> {
        Ok(self.store.get_order(id).await?)
    }

    /// Lists all orders, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.list_orders().await?)
    }

    /// Overwrites an order's header and replaces all of its lines.
    ///
    /// Tax and total are recomputed from the new subtotal exactly as on
    /// creation; client-supplied values are never stored.
    #[tracing::instrument(skip(self, cmd), fields(order_id = %cmd.order_id, lines = cmd.items.len()))]
    pub async fn update_order(&self, cmd: ReviseOrder) -> Result<(), DomainError> {
        cmd.validate()?;

        let totals = OrderTotals::from_subtotal(cmd.subtotal);
        let order_id = cmd.order_id;
        let draft = OrderDraft {
            customer_name: cmd.customer_name,
            customer_phone: cmd.customer_phone,
            status: cmd.status.map(|s| s.trim().to_string()),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            items: cmd.items,
        };

        self.store.replace_order(order_id, draft).await?;

        metrics::counter!("orders_updated_total").increment(1);
        tracing::info!(%order_id, "order updated");
        Ok(())
    }

    /// Deletes an order and all of its lines.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), DomainError> {
        self.store.delete_order(id).await?;

        metrics::counter!("orders_deleted_total").increment(1);
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    /// Checks that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), DomainError> {
        Ok(self.store.ping().await?)
    }
}
