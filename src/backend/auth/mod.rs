//! Authentication Module
//!
//! Username/password accounts with stateless JWT sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and stores (memory, PostgreSQL)
//! ├── sessions.rs     - JWT token management
//! ├── state.rs        - AuthState shared by handlers and middleware
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username and password → user created → token returned
//! 2. **Login**: username and password → credentials verified → token returned
//! 3. **Get Me**: bearer token → token verified → user info returned
//!
//! Logging out is client-side: the client discards its token.

/// User data model and stores
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Shared auth state
pub mod state;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::{get_me, login, signup};
pub use state::AuthState;
pub use users::{MemoryUserStore, PgUserStore, User, UserStore};
