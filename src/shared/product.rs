/**
 * Product Data Structures
 *
 * Products are submitted through the storefront form (or the `sendTable`
 * real-time event) and listed back to clients.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A catalogue product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier assigned on save, starting at 1
    pub id: u64,
    pub title: String,
    pub price: f64,
    /// Image URL
    pub thumbnail: String,
}

/// A product as submitted, before an id is assigned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
}

impl NewProduct {
    /// Validate a submitted product
    ///
    /// Titles must not be blank and prices must be finite and non-negative.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.title.trim().is_empty() {
            return Err(SharedError::validation("title", "title must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SharedError::validation(
                "price",
                "price must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Attach an id
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title.trim().to_string(),
            price: self.price,
            thumbnail: self.thumbnail,
        }
    }
}
