/**
 * Signup Handler
 *
 * POST /api/productos/signup
 *
 * # Registration Process
 *
 * 1. Validate username format and password length
 * 2. Hash the password with bcrypt at the configured cost
 * 3. Create the user (409 when the username is taken)
 * 4. Return a session token and the public user view
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::state::AuthState;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// 3-30 chars, starts with a letter, then letters, digits or underscores
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username or password shorter than 8 characters
/// * `409 Conflict` - Username already taken
/// * `503 Service Unavailable` - User store unreachable
pub async fn signup(
    State(auth): State<AuthState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("[Auth] Signup request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        tracing::warn!("[Auth] Invalid username format: {}", request.username);
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("[Auth] Password too short");
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters",
        ));
    }

    let password_hash = auth.hash_password(request.password).await?;
    let user = auth.users.create_user(request.username, password_hash).await?;
    let token = auth.issue_token(user.id, &user.username)?;

    tracing::info!("[Auth] User created: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}
