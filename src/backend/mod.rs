//! Backend Module
//!
//! All server-side code: an Axum HTTP server over a SQLite store.
//!
//! # Architecture
//!
//! - **`server`** - Startup, application state, configuration loading
//! - **`routes`** - Route tables and router assembly
//! - **`middleware`** - `x-auth-token` verification
//! - **`auth`** - Users, tokens, password hashing, auth handlers
//! - **`profile`** - Developer profiles and the GitHub proxy
//! - **`posts`** - Posts, likes and comments
//! - **`error`** - `ApiError` and its HTTP mapping
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the token service and the GitHub
//! client. All of it is read-only after startup; handlers extract the
//! piece they need through `FromRef`.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod profile;
pub mod routes;
pub mod server;
