//! Item service.

use common::ItemId;
use store::{Item, ItemStore};

use crate::error::DomainError;

use super::SaveItem;

/// Service for managing the menu.
pub struct ItemService<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> ItemService<S> {
    /// Creates a new item service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every menu item.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, DomainError> {
        Ok(self.store.list_items().await?)
    }

    /// Fetches one menu item.
    #[tracing::instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Result<Item, DomainError> {
        Ok(self.store.get_item(id).await?)
    }

    /// Validates and stores a new menu item.
    #[tracing::instrument(skip(self))]
    pub async fn create_item(&self, cmd: SaveItem) -> Result<Item, DomainError> {
        let fields = cmd.validate()?;
        let item = self.store.create_item(fields).await?;

        metrics::counter!("items_created_total").increment(1);
        tracing::info!(item_id = %item.id, "item created");
        Ok(item)
    }

    /// Validates and overwrites an existing menu item.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(&self, id: ItemId, cmd: SaveItem) -> Result<Item, DomainError> {
        let fields = cmd.validate()?;
        Ok(self.store.update_item(id, fields).await?)
    }

    /// Removes a menu item that no order references.
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, id: ItemId) -> Result<(), DomainError> {
        self.store.delete_item(id).await?;

        metrics::counter!("items_deleted_total").increment(1);
        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }
}
