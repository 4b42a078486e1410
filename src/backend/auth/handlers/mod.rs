//! Authentication Handlers Module
//!
//! HTTP handlers for the user and auth endpoints.
//!
//! # Handlers
//!
//! - **`register`** - POST /api/users - Create an account, returns a token
//! - **`login`** - POST /api/auth - Exchange credentials for a token
//! - **`get_me`** - GET /api/auth - Current user (protected)

/// Request and response types
pub mod types;

/// Register handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

pub use login::login;
pub use me::get_me;
pub use signup::register;
