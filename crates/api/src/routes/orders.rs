//! Order CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use common::{ItemId, Money, OrderId};
use domain::{LineItem, Order, PlaceOrder, ReviseOrder};
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::error::ApiError;
use crate::{AppState, Store};

// -- Request types --

/// Body of order create and update requests.
///
/// `tax`, `total`, `id` and `created_at` may be present but are ignored:
/// the server derives them. `status` is only honoured on update.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default, alias = "customerName")]
    pub customer_name: String,
    #[serde(default, alias = "customerPhone")]
    pub customer_phone: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub subtotal: Money,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    pub item_id: ItemId,
    pub quantity: i32,
    #[serde(default)]
    pub price_at_order: Money,
}

impl OrderRequest {
    fn lines(items: Vec<OrderLineRequest>) -> Vec<LineItem> {
        items
            .into_iter()
            .map(|l| LineItem {
                item_id: l.item_id,
                quantity: l.quantity,
                price_at_order: l.price_at_order,
            })
            .collect()
    }

    fn into_place(self) -> PlaceOrder {
        PlaceOrder::new(
            self.customer_name,
            self.customer_phone,
            self.subtotal,
            Self::lines(self.items),
        )
    }

    fn into_revise(self, order_id: OrderId) -> ReviseOrder {
        let mut cmd = ReviseOrder::new(
            order_id,
            self.customer_name,
            self.customer_phone,
            self.subtotal,
            Self::lines(self.items),
        );
        cmd.status = self.status;
        cmd
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: OrderId,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// -- Handlers --

/// POST /api/orders — place an order with its lines.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderCreatedResponse>, ApiError> {
    let Json(req) = payload?;
    let order_id = state.orders.create_order(req.into_place()).await?;
    Ok(Json(OrderCreatedResponse { order_id }))
}

/// GET /api/orders — list all orders, most recent first.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_orders().await?))
}

/// GET /api/orders/{id} — fetch one order with its lines.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id: OrderId = parse_id(&id, "order")?;
    Ok(Json(state.orders.get_order(id).await?))
}

/// PUT /api/orders/{id} — overwrite an order and replace all of its lines.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: OrderId = parse_id(&id, "order")?;
    let Json(req) = payload?;
    state.orders.update_order(req.into_revise(id)).await?;
    Ok(Json(MessageResponse {
        message: "Order updated successfully",
    }))
}

/// DELETE /api/orders/{id} — delete an order and its lines.
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: OrderId = parse_id(&id, "order")?;
    state.orders.delete_order(id).await?;
    Ok(Json(MessageResponse {
        message: "Order deleted successfully",
    }))
}
