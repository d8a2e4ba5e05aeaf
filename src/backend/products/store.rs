/**
 * Product Store
 *
 * In-memory product catalogue. Ids are assigned on save, starting at 1.
 */

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::error::BackendError;
use crate::shared::{NewProduct, Product};

#[derive(Debug, Default)]
struct Catalogue {
    products: Vec<Product>,
    next_id: u64,
}

/// Shared handle to the product catalogue
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    inner: Arc<RwLock<Catalogue>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and save a product, returning it with its id
    pub async fn save(&self, product: NewProduct) -> Result<Product, BackendError> {
        product.validate()?;

        let mut catalogue = self.inner.write().await;
        let id = catalogue
            .next_id
            .checked_add(1)
            .ok_or_else(|| BackendError::state("product id space exhausted"))?;
        catalogue.next_id = id;

        let saved = product.into_product(id);
        catalogue.products.push(saved.clone());
        Ok(saved)
    }

    /// All products in insertion order
    pub async fn get_all(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }
}
