/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool
 * 2. Pick the message and user stores (PostgreSQL when a pool exists,
 *    memory otherwise)
 * 3. Create the connection registry and chat pipeline
 * 4. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::backend::auth::{AuthState, MemoryUserStore, PgUserStore, UserStore};
use crate::backend::chat::{ChatPipeline, MemoryMessageStore, MessageStore, PgMessageStore};
use crate::backend::products::ProductStore;
use crate::backend::realtime::{ConnectionRegistry, InProcessRegistry};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// Never fails: an unreachable database downgrades to in-memory stores.
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing storefront server");

    let db_pool = load_database(&config).await;
    let state = build_state(config, db_pool);

    tracing::info!(
        "[Chat] Using {} message store",
        state.chat.store_name()
    );

    create_router(state)
}

/// Assemble `AppState`, choosing stores by whether a pool is available
///
/// The pool lives on inside the PostgreSQL stores; `AppState` does not keep it.
pub fn build_state(config: AppConfig, db_pool: Option<PgPool>) -> AppState {
    let (messages, users): (Arc<dyn MessageStore>, Arc<dyn UserStore>) = match &db_pool {
        Some(pool) => (
            Arc::new(PgMessageStore::new(pool.clone())),
            Arc::new(PgUserStore::new(pool.clone())),
        ),
        None => (
            Arc::new(MemoryMessageStore::new()),
            Arc::new(MemoryUserStore::new()),
        ),
    };

    if config.uses_dev_secret() {
        tracing::warn!("[Auth] JWT_SECRET not set; using the development secret");
    }

    let registry: Arc<dyn ConnectionRegistry> = Arc::new(InProcessRegistry::new());

    AppState {
        chat: ChatPipeline::new(messages, registry),
        products: ProductStore::new(),
        auth: AuthState::new(users, &config),
        config: Arc::new(config),
    }
}
