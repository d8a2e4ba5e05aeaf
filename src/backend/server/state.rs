/**
 * Application State Management
 *
 * `AppState` is the central state container. The websocket handler takes
 * all of it; the `FromRef` implementations let the product and auth handlers
 * extract only `State<ProductStore>` or `State<AuthState>`.
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and shares its data through `Arc`:
 * - `ChatPipeline` holds the message store, the connection registry and the
 *   publish lock
 * - `ProductStore` wraps `Arc<RwLock<..>>`
 * - `AuthState` holds `Arc<dyn UserStore>`
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::AuthState;
use crate::backend::chat::ChatPipeline;
use crate::backend::products::ProductStore;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<AppConfig>,

    /// Chat publish pipeline (store, normalizer, registry)
    pub chat: ChatPipeline,

    /// Product catalogue
    pub products: ProductStore,

    /// Accounts and session settings
    pub auth: AuthState,
}

impl FromRef<AppState> for ProductStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.products.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
