//! Products Module
//!
//! In-memory product catalogue and its HTTP handlers. Products can also be
//! added over the websocket with a `sendTable` event (see `realtime`).

/// Product catalogue
pub mod store;

/// HTTP handlers
pub mod handlers;

pub use handlers::{add_product, list_products};
pub use store::ProductStore;
