//! Backend Module
//!
//! All server-side code: the Axum HTTP server, the websocket chat transport,
//! the chat publish pipeline, products and accounts.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Message stores and the publish pipeline
//! - **`realtime`** - Connection registry and websocket transport
//! - **`products`** - Product catalogue and handlers
//! - **`auth`** - Accounts, JWT sessions, auth handlers
//! - **`middleware`** - Bearer token middleware
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── chat/           - Message stores and pipeline
//! ├── realtime/       - Registry and websocket
//! ├── products/       - Product catalogue
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! - HTTP handlers return `BackendError`, rendered as JSON `{error, status}`
//! - Chat event failures are logged at the websocket boundary and never
//!   reach the sender

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat pipeline and message stores
pub mod chat;

/// Real-time transport and connection registry
pub mod realtime;

/// Product catalogue
pub mod products;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use chat::ChatPipeline;
pub use error::BackendError;
pub use realtime::{ConnectionRegistry, InProcessRegistry};
pub use server::{create_app, AppState};
