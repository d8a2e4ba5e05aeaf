//! Real-time Update Module
//!
//! Websocket transport and the registry of live connections.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── registry.rs  - ConnectionRegistry trait and in-process implementation
//! └── websocket.rs - GET /ws handler and inbound event dispatch
//! ```
//!
//! # Events
//!
//! | Direction | Event | Audience |
//! |---|---|---|
//! | in | `msg` | - |
//! | in | `sendTable` | - |
//! | out | `msg-list` | every connection (and a new connection on join) |
//! | out | `prods` | the connection that sent `sendTable` |

/// Connection registry
pub mod registry;

/// Websocket transport
pub mod websocket;

pub use registry::{
    BroadcastReport, ConnectionId, ConnectionRegistry, InProcessRegistry, OutboundReceiver, OUTBOUND_CAPACITY,
};
pub use websocket::{dispatch_client_event, websocket_handler};
