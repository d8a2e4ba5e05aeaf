/**
 * Current User Handler
 *
 * GET /api/productos/me, behind `auth_middleware`.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::state::AuthState;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Return the authenticated user
///
/// # Errors
///
/// * `401 Unauthorized` - No valid token (rejected by the middleware)
/// * `404 Not Found` - The token's user no longer exists
pub async fn get_me(
    State(auth): State<AuthState>,
    AuthUser(current): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = auth
        .users
        .find_by_id(current.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] User not found: {}", current.user_id);
            BackendError::handler(StatusCode::NOT_FOUND, "User not found")
        })?;

    Ok(Json(user.into()))
}
