//! Middleware Module
//!
//! HTTP middleware run before handlers.
//!
//! - **`auth`** - Token verification for protected routes

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser, AUTH_HEADER};
