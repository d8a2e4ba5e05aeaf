//! Errors raised outside the server stack
//!
//! The normalizer, the event envelopes and product validation report through
//! `SharedError`. The backend wraps it in `BackendError::SharedError` and maps
//! validation and event failures to 400.
//!
//! ```rust
//! use storefront::shared::error::SharedError;
//!
//! let error = SharedError::validation("author.id", "email must not be empty");
//! assert!(error.is_validation());
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A value could not be encoded or decoded as JSON
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// A record failed a field check (missing email, blank title, bad price)
    #[error("Validation error in field '{field}': {message}")]
    ValidationError { field: String, message: String },

    /// An inbound websocket frame is not a known event
    #[error("Event error: {message}")]
    EventError { message: String },
}

impl SharedError {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Validation failure on `field`, e.g. `author.id` or `price`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn event(message: impl Into<String>) -> Self {
        Self::EventError {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
