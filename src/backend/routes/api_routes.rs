/**
 * API Routes
 *
 * Everything under `/api/productos`:
 *
 * | Method | Path | Handler |
 * |---|---|---|
 * | GET | `/api/productos` | `list_products` |
 * | POST | `/api/productos/form` | `add_product` |
 * | POST | `/api/productos/signup` | `signup` |
 * | POST | `/api/productos/login` | `login` |
 * | GET | `/api/productos/me` | `get_me` (bearer token) |
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::middleware::auth_middleware;
use crate::backend::products::{add_product, list_products};
use crate::backend::server::state::AppState;

/// Add the API routes to `router`
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/productos/me", get(get_me))
        .route_layer(from_fn_with_state(app_state.auth.clone(), auth_middleware));

    router
        .route("/api/productos", get(list_products))
        .route("/api/productos/form", post(add_product))
        // Authentication endpoints
        .route("/api/productos/signup", post(signup))
        .route("/api/productos/login", post(login))
        .merge(protected)
}
