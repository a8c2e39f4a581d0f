use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    PgConnection, PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};

use crate::{
    Item, ItemFields, ItemId, LineItem, Money, OrderDraft, OrderId, OrderItemId, Result,
    StoreError,
    model::{Order, OrderItem},
    store::{ItemStore, OrderStore},
};

/// Foreign key from `order_items.item_id` to `items.id`.
const ITEM_FOREIGN_KEY: &str = "fk_order_items_item";

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it in a store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the embedded database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_item(row: PgRow) -> Result<Item> {
        Ok(Item {
            id: ItemId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            price: Money::from_cents(row.try_get("price_cents")?),
        })
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            status: row.try_get("status")?,
            subtotal: Money::from_cents(row.try_get("subtotal_cents")?),
            tax: Money::from_cents(row.try_get("tax_cents")?),
            total: Money::from_cents(row.try_get("total_cents")?),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            items: Vec::new(),
        })
    }

    fn row_to_order_item(row: PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            id: OrderItemId::new(row.try_get("id")?),
            order_id: OrderId::new(row.try_get("order_id")?),
            item_id: ItemId::new(row.try_get("item_id")?),
            item_name: row.try_get("item_name")?,
            quantity: row.try_get("quantity")?,
            price_at_order: Money::from_cents(row.try_get("price_at_order_cents")?),
        })
    }

    async fn fetch_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
            SELECT oi.id, oi.order_id, oi.item_id, i.name AS item_name,
                   oi.quantity, oi.price_at_order_cents
            FROM order_items oi
            JOIN items i ON oi.item_id = i.id
            WHERE oi.order_id = $1
            ORDER BY oi.id ASC
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order_item).collect()
    }

    async fn insert_lines(
        conn: &mut PgConnection,
        order_id: OrderId,
        lines: &[LineItem],
    ) -> Result<()> {
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, quantity, price_at_order_cents)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id.as_i64())
            .bind(line.item_id.as_i64())
            .bind(line.quantity)
            .bind(line.price_at_order.cents())
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some(ITEM_FOREIGN_KEY)
                {
                    return StoreError::UnknownItem(line.item_id);
                }
                StoreError::Database(e)
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PostgresStore {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            "SELECT id, name, description, category, price_cents FROM items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn get_item(&self, id: ItemId) -> Result<Item> {
        let row = sqlx::query(
            "SELECT id, name, description, category, price_cents FROM items WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_item(row),
            None => Err(StoreError::item_not_found(id)),
        }
    }

    async fn create_item(&self, fields: ItemFields) -> Result<Item> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items (name, description, category, price_cents)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.category)
        .bind(fields.price.cents())
        .fetch_one(&self.pool)
        .await?;

        Ok(fields.into_item(ItemId::new(id)))
    }

    async fn update_item(&self, id: ItemId, fields: ItemFields) -> Result<Item> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = $1, description = $2, category = $3, price_cents = $4
            WHERE id = $5
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.category)
        .bind(fields.price.cents())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::item_not_found(id));
        }
        Ok(fields.into_item(id))
    }

    async fn delete_item(&self, id: ItemId) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some(ITEM_FOREIGN_KEY)
                {
                    return StoreError::ItemInUse(id);
                }
                StoreError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::item_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn insert_order(&self, draft: OrderDraft) -> Result<OrderId> {
        // Dropping `tx` on any early return rolls the whole order back.
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (customer_name, customer_phone, status, subtotal_cents, tax_cents, total_cents)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&draft.customer_name)
        .bind(&draft.customer_phone)
        .bind(draft.status_or_default())
        .bind(draft.subtotal.cents())
        .bind(draft.tax.cents())
        .bind(draft.total.cents())
        .fetch_one(&mut *tx)
        .await?;

        let order_id = OrderId::new(id);
        Self::insert_lines(&mut *tx, order_id, &draft.items).await?;

        tx.commit().await?;
        tracing::debug!(%order_id, lines = draft.items.len(), "order inserted");
        Ok(order_id)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_name, customer_phone, status, subtotal_cents, tax_cents, total_cents, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Err(StoreError::order_not_found(id));
        };

        let mut order = Self::row_to_order(row)?;
        order.items = self.fetch_order_items(order.id).await?;
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, customer_phone, status, subtotal_cents, tax_cents, total_cents, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let mut order = Self::row_to_order(row)?;
            order.items = self.fetch_order_items(order.id).await?;
            orders.push(order);
        }
        Ok(orders)
    }

    async fn replace_order(&self, id: OrderId, draft: OrderDraft) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET customer_name = $1,
                customer_phone = $2,
                status = COALESCE($3, status),
                subtotal_cents = $4,
                tax_cents = $5,
                total_cents = $6
            WHERE id = $7
            "#,
        )
        .bind(&draft.customer_name)
        .bind(&draft.customer_phone)
        .bind(draft.status.as_deref())
        .bind(draft.subtotal.cents())
        .bind(draft.tax.cents())
        .bind(draft.total.cents())
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::order_not_found(id));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        Self::insert_lines(&mut *tx, id, &draft.items).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::order_not_found(id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
