//! Shared Module
//!
//! Types that are not tied to the HTTP server: the JSON error shapes the
//! client consumes, request validation helpers, and application
//! configuration.

/// Shared error types
pub mod error;

/// Request validation helpers
pub mod validation;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::{ErrorsBody, FieldError, MessageBody};
pub use validation::Validator;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
