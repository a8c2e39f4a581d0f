//! Item commands.

use common::Money;
use store::ItemFields;

use crate::error::ValidationError;

/// Command carrying the writable fields of a menu item, used for both
/// creation and full replacement.
#[derive(Debug, Clone)]
pub struct SaveItem {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Money,
}

impl SaveItem {
    /// Creates a command with empty description and category.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Checks that the name is non-empty and the price positive.
    pub fn validate(self) -> Result<ItemFields, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if !self.price.is_positive() {
            return Err(ValidationError::InvalidPrice { price: self.price });
        }

        Ok(ItemFields {
            name: name.to_string(),
            description: self.description,
            category: self.category,
            price: self.price,
        })
    }
}
