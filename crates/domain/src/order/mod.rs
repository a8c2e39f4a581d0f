//! Order workflow.

mod commands;
mod pricing;
mod service;

pub use commands::{PlaceOrder, ReviseOrder};
pub use pricing::{OrderTotals, TAX_RATE_PERCENT};
pub use service::OrderService;
