use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    Item, ItemFields, ItemId, LineItem, Money, OrderDraft, OrderId, OrderItemId, Result,
    StoreError,
    model::{DEFAULT_STATUS, Order, OrderItem},
    store::{ItemStore, OrderStore},
};

struct OrderRow {
    customer_name: String,
    customer_phone: String,
    status: String,
    subtotal: Money,
    tax: Money,
    total: Money,
    created_at: DateTime<Utc>,
}

struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    line: LineItem,
}

#[derive(Default)]
struct Tables {
    items: BTreeMap<ItemId, ItemFields>,
    orders: BTreeMap<OrderId, OrderRow>,
    order_items: Vec<OrderItemRow>,
    item_seq: i64,
    order_seq: i64,
    order_item_seq: i64,
}

impl Tables {
    fn next(seq: &mut i64) -> i64 {
        *seq += 1;
        *seq
    }

    /// Mirrors the foreign key on `order_items.item_id`.
    fn check_references(&self, lines: &[LineItem]) -> Result<()> {
        match lines.iter().find(|l| !self.items.contains_key(&l.item_id)) {
            Some(line) => Err(StoreError::UnknownItem(line.item_id)),
            None => Ok(()),
        }
    }

    fn insert_lines(&mut self, order_id: OrderId, lines: &[LineItem]) {
        for line in lines {
            let id = OrderItemId::new(Self::next(&mut self.order_item_seq));
            self.order_items.push(OrderItemRow {
                id,
                order_id,
                line: *line,
            });
        }
    }

    fn assemble(&self, id: OrderId, row: &OrderRow) -> Order {
        // Inner join semantics: lines whose item vanished are skipped.
        let items = self
            .order_items
            .iter()
            .filter(|r| r.order_id == id)
            .filter_map(|r| {
                self.items.get(&r.line.item_id).map(|item| OrderItem {
                    id: r.id,
                    order_id: r.order_id,
                    item_id: r.line.item_id,
                    item_name: item.name.clone(),
                    quantity: r.line.quantity,
                    price_at_order: r.line.price_at_order,
                })
            })
            .collect();

        Order {
            id,
            customer_name: row.customer_name.clone(),
            customer_phone: row.customer_phone.clone(),
            status: row.status.clone(),
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            created_at: row.created_at,
            items,
        }
    }
}

/// In-memory store implementation for testing.
///
/// Provides the same interface and referential checks as the PostgreSQL
/// implementation. Every write runs under one lock and validates before
/// mutating, so multi-row writes are all-or-nothing.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of order lines across all orders.
    pub async fn order_line_count(&self) -> usize {
        self.tables.read().await.order_items.len()
    }

    /// Returns the number of order headers.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Clears all tables and resets id sequences.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .map(|(id, fields)| fields.clone().into_item(*id))
            .collect())
    }

    async fn get_item(&self, id: ItemId) -> Result<Item> {
        let tables = self.tables.read().await;
        tables
            .items
            .get(&id)
            .map(|fields| fields.clone().into_item(id))
            .ok_or_else(|| StoreError::item_not_found(id))
    }

    async fn create_item(&self, fields: ItemFields) -> Result<Item> {
        let mut tables = self.tables.write().await;
        let id = ItemId::new(Tables::next(&mut tables.item_seq));
        tables.items.insert(id, fields.clone());
        Ok(fields.into_item(id))
    }

    async fn update_item(&self, id: ItemId, fields: ItemFields) -> Result<Item> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .items
            .get_mut(&id)
            .ok_or_else(|| StoreError::item_not_found(id))?;
        *slot = fields.clone();
        Ok(fields.into_item(id))
    }

    async fn delete_item(&self, id: ItemId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.items.contains_key(&id) {
            return Err(StoreError::item_not_found(id));
        }
        if tables.order_items.iter().any(|r| r.line.item_id == id) {
            return Err(StoreError::ItemInUse(id));
        }
        tables.items.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, draft: OrderDraft) -> Result<OrderId> {
        let mut tables = self.tables.write().await;
        tables.check_references(&draft.items)?;

        let order_id = OrderId::new(Tables::next(&mut tables.order_seq));
        tables.orders.insert(
            order_id,
            OrderRow {
                customer_name: draft.customer_name.clone(),
                customer_phone: draft.customer_phone.clone(),
                status: draft.status_or_default().to_string(),
                subtotal: draft.subtotal,
                tax: draft.tax,
                total: draft.total,
                created_at: Utc::now(),
            },
        );
        tables.insert_lines(order_id, &draft.items);
        Ok(order_id)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order> {
        let tables = self.tables.read().await;
        let row = tables
            .orders
            .get(&id)
            .ok_or_else(|| StoreError::order_not_found(id))?;
        Ok(tables.assemble(id, row))
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .map(|(id, row)| tables.assemble(*id, row))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn replace_order(&self, id: OrderId, draft: OrderDraft) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&id) {
            return Err(StoreError::order_not_found(id));
        }
        tables.check_references(&draft.items)?;

        if let Some(row) = tables.orders.get_mut(&id) {
            row.customer_name = draft.customer_name;
            row.customer_phone = draft.customer_phone;
            if let Some(status) = draft.status {
                row.status = status;
            }
            row.subtotal = draft.subtotal;
            row.tax = draft.tax;
            row.total = draft.total;
        }
        tables.order_items.retain(|r| r.order_id != id);
        tables.insert_lines(id, &draft.items);
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.orders.remove(&id).is_none() {
            return Err(StoreError::order_not_found(id));
        }
        tables.order_items.retain(|r| r.order_id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margherita() -> ItemFields {
        ItemFields {
            name: "Margherita".to_string(),
            description: "Tomato, mozzarella, basil".to_string(),
            category: "pizza".to_string(),
            price: Money::from_cents(950),
        }
    }

    fn draft(lines: Vec<LineItem>) -> OrderDraft {
        OrderDraft {
            customer_name: "Ada".to_string(),
            customer_phone: "555-0100".to_string(),
            status: None,
            subtotal: Money::from_cents(2000),
            tax: Money::from_cents(200),
            total: Money::from_cents(2200),
            items: lines,
        }
    }

    fn line(item_id: ItemId, quantity: i32) -> LineItem {
        LineItem {
            item_id,
            quantity,
            price_at_order: Money::from_cents(1000),
        }
    }

    #[tokio::test]
    async fn item_crud_roundtrip() {
        let store = InMemoryStore::new();
        let created = store.create_item(margherita()).await.unwrap();
        assert_eq!(created.id, ItemId::new(1));

        let fetched = store.get_item(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let mut fields = margherita();
        fields.price = Money::from_cents(1100);
        let updated = store.update_item(created.id, fields).await.unwrap();
        assert_eq!(updated.price.cents(), 1100);

        store.delete_item(created.id).await.unwrap();
        let err = store.get_item(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn missing_item_operations_report_not_found() {
        let store = InMemoryStore::new();
        let id = ItemId::new(99);
        assert!(store.get_item(id).await.unwrap_err().is_not_found());
        assert!(
            store
                .update_item(id, margherita())
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(store.delete_item(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn referenced_item_cannot_be_deleted() {
        let store = InMemoryStore::new();
        let item = store.create_item(margherita()).await.unwrap();
        store
            .insert_order(draft(vec![line(item.id, 1)]))
            .await
            .unwrap();

        let err = store.delete_item(item.id).await.unwrap_err();
        assert!(matches!(err, StoreError::ItemInUse(id) if id == item.id));
        assert!(store.get_item(item.id).await.is_ok());
    }

    #[tokio::test]
    async fn insert_order_defaults_status_and_joins_names() {
        let store = InMemoryStore::new();
        let item = store.create_item(margherita()).await.unwrap();

        let id = store
            .insert_order(draft(vec![line(item.id, 2), line(item.id, 1)]))
            .await
            .unwrap();

        let order = store.get_order(id).await.unwrap();
        assert_eq!(order.status, DEFAULT_STATUS);
        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|i| i.item_name == "Margherita"));
        assert!(order.items[0].id < order.items[1].id);
    }

    #[tokio::test]
    async fn insert_order_with_unknown_item_writes_nothing() {
        let store = InMemoryStore::new();
        let item = store.create_item(margherita()).await.unwrap();

        let err = store
            .insert_order(draft(vec![line(item.id, 1), line(ItemId::new(404), 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::UnknownItem(id) if id == ItemId::new(404)));
        assert_eq!(store.order_count().await, 0);
        assert_eq!(store.order_line_count().await, 0);
    }

    #[tokio::test]
    async fn replace_order_swaps_all_lines() {
        let store = InMemoryStore::new();
        let a = store.create_item(margherita()).await.unwrap();
        let mut pepperoni = margherita();
        pepperoni.name = "Pepperoni".to_string();
        let b = store.create_item(pepperoni).await.unwrap();

        let id = store.insert_order(draft(vec![line(a.id, 1)])).await.unwrap();

        let mut revised = draft(vec![line(b.id, 3)]);
        revised.status = Some("ready".to_string());
        store.replace_order(id, revised).await.unwrap();

        let order = store.get_order(id).await.unwrap();
        assert_eq!(order.status, "ready");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].item_name, "Pepperoni");
        assert_eq!(order.items[0].quantity, 3);
    }

    #[tokio::test]
    async fn replace_order_failure_keeps_previous_lines() {
        let store = InMemoryStore::new();
        let item = store.create_item(margherita()).await.unwrap();
        let id = store
            .insert_order(draft(vec![line(item.id, 2)]))
            .await
            .unwrap();

        let mut revised = draft(vec![line(ItemId::new(404), 1)]);
        revised.customer_name = "Changed".to_string();
        assert!(store.replace_order(id, revised).await.is_err());

        let order = store.get_order(id).await.unwrap();
        assert_eq!(order.customer_name, "Ada");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn replace_missing_order_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .replace_order(OrderId::new(1), draft(Vec::new()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_order_removes_header_and_lines() {
        let store = InMemoryStore::new();
        let item = store.create_item(margherita()).await.unwrap();
        let keep = store
            .insert_order(draft(vec![line(item.id, 1)]))
            .await
            .unwrap();
        let gone = store
            .insert_order(draft(vec![line(item.id, 1), line(item.id, 2)]))
            .await
            .unwrap();

        store.delete_order(gone).await.unwrap();

        assert!(store.get_order(gone).await.unwrap_err().is_not_found());
        assert_eq!(store.get_order(keep).await.unwrap().items.len(), 1);
        assert_eq!(store.order_line_count().await, 1);
        assert!(store.delete_order(gone).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_orders_most_recent_first() {
        let store = InMemoryStore::new();
        let first = store.insert_order(draft(Vec::new())).await.unwrap();
        let second = store.insert_order(draft(Vec::new())).await.unwrap();

        let orders = store.list_orders().await.unwrap();
        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second, first]);
    }
}
