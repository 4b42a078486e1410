//! Shared Error Types
//!
//! This module defines the JSON error shapes the API sends to clients.
//! The React client renders these directly, so the shapes are part of
//! the wire contract:
//!
//! - `{ "msg": "..." }` for single-message failures (auth, not found)
//! - `{ "errors": [{ "msg": "...", "param": "..." }] }` for validation
//!
//! # Usage
//!
//! ```rust
//! use devconnector::shared::error::FieldError;
//!
//! let error = FieldError::new("email", "Please include a valid email");
//! assert_eq!(error.param.as_deref(), Some("email"));
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation failure, optionally tied to a request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{msg}")]
pub struct FieldError {
    /// Human-readable error message
    pub msg: String,
    /// The request field that failed validation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    /// Create a validation error for a specific field
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }

    /// Create a validation error not tied to any field
    ///
    /// Used for "Invalid Credentials" and "User already exists".
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

/// `{ "msg": "..." }` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub msg: String,
}

impl MessageBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// `{ "errors": [...] }` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsBody {
    pub errors: Vec<FieldError>,
}
