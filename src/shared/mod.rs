//! Shared Module
//!
//! Types used on both sides of the real-time connection: chat messages, the
//! normalized chat graph, event envelopes, products and configuration.
//!
//! Nothing here depends on the server stack, so the normalizer and the wire
//! types can be used (and tested) without the `ssr` feature.

/// Chat message data structures
pub mod message;

/// Chat history normalization
pub mod normalize;

/// Real-time event envelopes
pub mod event;

/// Product data structures
pub mod product;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use event::{ClientEvent, ServerEvent};
pub use message::{ChatHistory, ChatMessage, IncomingChatMessage};
pub use normalize::{normalize, NormalizedChat, CHAT_SCHEMA};
pub use product::{NewProduct, Product};
