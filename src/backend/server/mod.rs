//! Server assembly
//!
//! `create_app` connects the optional database, builds `AppState` through
//! `build_state` and hands it to the router. Without a reachable database
//! every store is in memory, which is also how the tests run.
//!
//! ```text
//! server/
//! ├── state.rs   - AppState and FromRef implementations
//! ├── config.rs  - Database connection and migrations
//! └── init.rs    - create_app, build_state
//! ```

pub mod state;

pub mod config;

pub mod init;

pub use init::{build_state, create_app};
pub use state::AppState;
