/**
 * Authentication State
 *
 * Everything the auth handlers and middleware need: the user store and the
 * token and hashing settings taken from `AppConfig`.
 */

use std::sync::Arc;

use axum::http::StatusCode;
use uuid::Uuid;

use crate::backend::auth::sessions::{create_token, verify_token, Claims};
use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserStore>,
    jwt_secret: Arc<str>,
    token_ttl_hours: i64,
    bcrypt_cost: u32,
}

impl AuthState {
    pub fn new(users: Arc<dyn UserStore>, config: &AppConfig) -> Self {
        Self {
            users,
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            token_ttl_hours: config.token_ttl_hours,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Issue a session token
    pub fn issue_token(&self, user_id: Uuid, username: &str) -> Result<String, BackendError> {
        create_token(user_id, username, &self.jwt_secret, self.token_ttl_hours).map_err(|e| {
            tracing::error!("[Auth] Failed to create token: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })
    }

    /// Verify a session token; any failure is 401
    pub fn verify(&self, token: &str) -> Result<Claims, BackendError> {
        verify_token(token, &self.jwt_secret).map_err(|e| {
            tracing::warn!("[Auth] Invalid token: {}", e);
            BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid or expired token")
        })
    }

    /// Hash a password off the async runtime
    pub async fn hash_password(&self, password: String) -> Result<String, BackendError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| BackendError::state(format!("hashing task failed: {e}")))?
            .map_err(|e| {
                tracing::error!("[Auth] Failed to hash password: {:?}", e);
                BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            })
    }

    /// Check a password against a stored hash off the async runtime
    pub async fn verify_password(&self, password: String, hash: String) -> Result<bool, BackendError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| BackendError::state(format!("hashing task failed: {e}")))?
            .map_err(|e| {
                tracing::error!("[Auth] Password verification error: {:?}", e);
                BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            })
    }
}
