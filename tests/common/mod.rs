//! Common test utilities and helpers
//!
//! - In-memory database fixture wired into the real router
//! - Authentication helpers
//! - Assertion macros for API responses

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
