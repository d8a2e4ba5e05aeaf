//! Chat Backend Module
//!
//! Server-side chat: message persistence and the publish pipeline that turns
//! each `msg` event into a normalized `msg-list` broadcast.
//!
//! # Architecture
//!
//! - **`store`** - `MessageStore` trait and the in-memory backend
//! - **`db`** - PostgreSQL backend
//! - **`pipeline`** - append, reload, normalize, broadcast
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::backend::chat::{ChatPipeline, MemoryMessageStore};
//! use storefront::backend::realtime::InProcessRegistry;
//!
//! let pipeline = ChatPipeline::new(
//!     Arc::new(MemoryMessageStore::new()),
//!     Arc::new(InProcessRegistry::new()),
//! );
//! ```

/// Message store trait and in-memory backend
pub mod store;

/// PostgreSQL message store
pub mod db;

/// Publish pipeline
pub mod pipeline;

pub use db::PgMessageStore;
pub use pipeline::ChatPipeline;
pub use store::{MemoryMessageStore, MessageStore};
