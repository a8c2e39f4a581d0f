//! Menu item CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{ItemId, Money};
use domain::{Item, SaveItem};
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;
use crate::{AppState, Store};

// -- Request types --

/// Body of item create and update requests. Any `id` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Money,
}

impl From<ItemRequest> for SaveItem {
    fn from(req: ItemRequest) -> Self {
        SaveItem::new(req.name, req.price)
            .with_description(req.description)
            .with_category(req.category)
    }
}

// -- Handlers --

/// GET /api/items — list the whole menu.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.items.list_items().await?))
}

/// POST /api/items — add a menu item.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(req) = payload?;
    let item = state.items.create_item(req.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items/{id} — fetch one menu item.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id: ItemId = parse_id(&id, "item")?;
    Ok(Json(state.items.get_item(id).await?))
}

/// PUT /api/items/{id} — replace a menu item.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let id: ItemId = parse_id(&id, "item")?;
    let Json(req) = payload?;
    Ok(Json(state.items.update_item(id, req.into()).await?))
}

/// DELETE /api/items/{id} — remove a menu item.
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: ItemId = parse_id(&id, "item")?;
    state.items.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
