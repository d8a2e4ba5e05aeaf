/**
 * Product HTTP Handlers
 *
 * - `GET /api/productos` - list products as JSON
 * - `POST /api/productos/form` - add a product from an urlencoded form
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::ApiForm;
use crate::backend::products::store::ProductStore;
use crate::shared::{NewProduct, Product};

/// List every product
pub async fn list_products(State(products): State<ProductStore>) -> Json<Vec<Product>> {
    Json(products.get_all().await)
}

/// Add a product submitted by the storefront form
///
/// # Returns
///
/// - `201 Created` with the saved product
/// - `400 Bad Request` when the form does not decode, the title is blank
///   or the price negative
pub async fn add_product(
    State(products): State<ProductStore>,
    ApiForm(product): ApiForm<NewProduct>,
) -> Result<(StatusCode, Json<Product>), BackendError> {
    let saved = products.save(product).await?;
    tracing::info!("[Products] Added product {} ({})", saved.id, saved.title);
    Ok((StatusCode::CREATED, Json(saved)))
}
