//! Menu item management.

mod commands;
mod service;

pub use commands::SaveItem;
pub use service::ItemService;
