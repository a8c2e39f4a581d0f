//! HTTP API server for the pizza shop backend.
//!
//! Provides REST endpoints for menu items and orders, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::{ItemService, OrderService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{ItemStore, OrderStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// A backend able to serve both the menu and orders.
pub trait Store: ItemStore + OrderStore + Clone + 'static {}

impl<T: ItemStore + OrderStore + Clone + 'static> Store for T {}

/// Shared application state accessible from all handlers.
pub struct AppState<S: Store> {
    pub items: ItemService<S>,
    pub orders: OrderService<S>,
}

/// Builds the application state with both services sharing one store.
pub fn create_state<S: Store>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        items: ItemService::new(store.clone()),
        orders: OrderService::new(store),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route(
            "/api/items",
            get(routes::items::list::<S>).post(routes::items::create::<S>),
        )
        .route(
            "/api/items/{id}",
            get(routes::items::get::<S>)
                .put(routes::items::update::<S>)
                .delete(routes::items::delete::<S>),
        )
        .route(
            "/api/orders",
            get(routes::orders::list::<S>).post(routes::orders::create::<S>),
        )
        .route(
            "/api/orders/{id}",
            get(routes::orders::get::<S>)
                .put(routes::orders::update::<S>)
                .delete(routes::orders::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
