//! Storefront - Main Library
//!
//! A small storefront server: a product catalogue, username/password
//! accounts and a real-time chat whose history is broadcast to every
//! connected client as a normalized entity graph.
//!
//! # Module Structure
//!
//! - **`shared`** - Types usable without the server stack
//!   - Chat messages, the normalizer and its schema
//!   - Event envelopes, products, configuration, errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and websocket transport
//!   - Message stores, connection registry, chat pipeline
//!   - Products, accounts, JWT sessions
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use storefront::backend::server::init::create_app;
//! use storefront::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Chat Pipeline
//!
//! A `msg` event flows through:
//!
//! 1. **Message Store** - append, then reload the full history
//! 2. **Normalizer** - flatten history into `mensaje` / `author` / `chat` tables
//! 3. **Connection Registry** - broadcast `msg-list` to every connection
//!
//! The whole sequence runs under one lock so broadcasts leave in append order.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
