//! Routes Module
//!
//! - **`router`** - `create_router`: websocket, API, static files, fallback
//! - **`api_routes`** - `/api/productos` endpoints

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
