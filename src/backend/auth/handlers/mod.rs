//! Account endpoints under `/api/productos`
//!
//! - `signup` - POST `/signup`, 201 with a token
//! - `login` - POST `/login`, 200 with a token
//! - `get_me` - GET `/me`, requires `Authorization: Bearer <token>`

pub mod types;

pub mod signup;

pub mod login;

pub mod me;

pub use types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

pub use login::login;
pub use me::get_me;
pub use signup::signup;
