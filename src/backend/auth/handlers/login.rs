/**
 * Login Handler
 *
 * POST /api/productos/login
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown users and wrong passwords both return 401 with the same message
 * - User passwords are never returned in responses
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::state::AuthState;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;

fn invalid_credentials() -> BackendError {
    BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid username or password")
}

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - User store unreachable
pub async fn login(
    State(auth): State<AuthState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("[Auth] Login request for: {}", request.username);

    let Some(user) = auth.users.find_by_username(&request.username).await? else {
        tracing::warn!("[Auth] User not found: {}", request.username);
        return Err(invalid_credentials());
    };

    let valid = auth
        .verify_password(request.password, user.password_hash.clone())
        .await?;
    if !valid {
        tracing::warn!("[Auth] Invalid password for user: {}", request.username);
        return Err(invalid_credentials());
    }

    let token = auth.issue_token(user.id, &user.username)?;
    tracing::info!("[Auth] User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
