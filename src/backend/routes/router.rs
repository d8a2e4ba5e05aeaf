/**
 * Router Creation
 *
 * Assembles the websocket endpoint, the API routes, static files from
 * `AppConfig::static_dir` and a JSON 404 fallback.
 */

use axum::{http::StatusCode, routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

use crate::backend::error::BackendError;
use crate::backend::realtime::websocket_handler;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Build the application router
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();

    // Real-time chat transport
    let router = Router::new().route("/ws", get(websocket_handler));

    let router = configure_api_routes(router, &app_state);

    // Static files
    let router = router
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&static_dir));

    // Fallback handler for 404
    let router = router.fallback(|| async {
        BackendError::handler(StatusCode::NOT_FOUND, "Not Found")
    });

    router.with_state(app_state)
}
