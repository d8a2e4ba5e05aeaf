/**
 * Session Management and JWT Tokens
 *
 * Login state is a signed HS256 token carried as `Authorization: Bearer`.
 * Tokens are stateless; there is no server-side session table.
 */

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Failure while issuing a token
#[derive(Debug, Error)]
pub enum TokenError {
    /// The lifetime does not fit in a timestamp
    #[error("token lifetime of {0} hours is out of range")]
    LifetimeOutOfRange(i64),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn unix_seconds(at: chrono::DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp()).unwrap_or(0)
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `user_id` - User ID (UUID)
/// * `username` - Username
/// * `secret` - HMAC secret
/// * `ttl_hours` - Token lifetime
pub fn create_token(
    user_id: Uuid,
    username: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let expires_at = TimeDelta::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(TokenError::LifetimeOutOfRange(ttl_hours))?;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: unix_seconds(expires_at),
        iat: unix_seconds(now),
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}
