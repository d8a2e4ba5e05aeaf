//! Backend Errors
//!
//! `BackendError` is returned by handlers, stores and the chat pipeline.
//! `conversion` renders it as a JSON `{error, status}` response.
//!
//! | Variant | Raised by | Status |
//! |---|---|---|
//! | `HandlerError` | handlers, auth | carried |
//! | `StateError` | poisoned locks, exhausted ids | 500 |
//! | `StorageError` | message and user stores | 503 |
//! | `TransportError` | registry `send_to` on a closed connection | 500 |
//! | `SharedError` | validation, event parsing | 400 |
//! | `SerializationError` | JSON encoding | 500 |

pub mod types;

pub mod conversion;

pub use types::BackendError;
