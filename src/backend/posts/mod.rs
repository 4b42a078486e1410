//! Posts Module
//!
//! Posts, likes and comments.

pub mod types;
pub mod db;
pub mod handlers;

pub use handlers::*;
