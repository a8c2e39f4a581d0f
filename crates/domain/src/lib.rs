//! Domain layer for the pizza shop backend.
//!
//! This crate provides:
//! - Item service with input validation for the menu
//! - Order workflow: tax and total derivation, status policy and
//!   transactional header-plus-lines writes through the store
//! - The error taxonomy surfaced to request handlers

pub mod error;
pub mod item;
pub mod order;

pub use error::{DomainError, ValidationError};
pub use item::{ItemService, SaveItem};
pub use order::{OrderService, OrderTotals, PlaceOrder, ReviseOrder, TAX_RATE_PERCENT};
pub use store::{Item, LineItem, Order, OrderItem};
