/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user. Verifies the bearer token,
 * checks the user still exists and attaches an `AuthenticatedUser` to the
 * request extensions for the `AuthUser` extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::state::AuthState;
use crate::backend::error::BackendError;

/// The user a request was authenticated as
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

fn unauthorized(message: &str) -> BackendError {
    BackendError::handler(StatusCode::UNAUTHORIZED, message)
}

/// Require a valid `Authorization: Bearer <token>` header
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing Authorization header");
            unauthorized("Missing Authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        unauthorized("Invalid Authorization header format")
    })?;

    let claims = auth.verify(token)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("[Auth] Invalid user ID in token: {:?}", e);
        unauthorized("Invalid or expired token")
    })?;

    if auth.users.find_by_id(user_id).await?.is_none() {
        tracing::warn!("[Auth] Token for unknown user {}", user_id);
        return Err(unauthorized("Invalid or expired token"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Extractor for the user attached by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                unauthorized("Not authenticated")
            })
    }
}
