//! Middleware Module
//!
//! - **`auth`** - Bearer token middleware and the `AuthUser` extractor
//! - **`extract`** - `ApiJson` / `ApiForm` body extractors with JSON 400 rejections
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use storefront::backend::auth::{get_me, AuthState};
//! use storefront::backend::middleware::auth_middleware;
//!
//! fn protected(auth: AuthState) -> Router<AuthState> {
//!     Router::new()
//!         .route("/me", get(get_me))
//!         .route_layer(from_fn_with_state(auth, auth_middleware))
//! }
//! ```

pub mod auth;

pub mod extract;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use extract::{ApiForm, ApiJson};
