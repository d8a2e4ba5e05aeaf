/**
 * Backend Error Types
 *
 * Storage failures stop the chat pipeline before its broadcast and surface
 * as 503 from HTTP handlers. Transport failures are per connection: the
 * registry prunes the connection and keeps going.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Every failure the server can report
///
/// ```rust
/// use storefront::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// let err = BackendError::storage("connection refused");
/// let err = BackendError::transport("connection closed");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Rejected request: bad credentials, taken username, unknown route
    #[error("Handler error: {message}")]
    HandlerError { status: StatusCode, message: String },

    /// Failed background task or exhausted product ids
    #[error("State error: {message}")]
    StateError { message: String },

    /// Persistence backend unreachable or failing
    #[error("Storage error: {message}")]
    StorageError { message: String },

    /// Delivery to a connection failed
    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Failure with an explicit HTTP status
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Message or user store failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    /// Whether this is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::SharedError(err) if err.is_validation())
    }

    /// HTTP status used when this error reaches a response
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StorageError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::TransportError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::EventError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field of the response body
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message } => message.clone(),
            Self::StorageError { message } => message.clone(),
            Self::TransportError { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err.to_string())
    }
}
