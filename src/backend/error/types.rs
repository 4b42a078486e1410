/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 * Each variant maps onto one of the client-visible failure kinds:
 *
 * - Authentication failures (missing or invalid token) → 401
 * - Validation failures (malformed request body) → 400 with field errors
 * - Business-rule rejections (already liked, no profile) → 400
 * - Ownership failures (deleting someone else's post) → 401
 * - Missing resources → 404
 * - Anything raised by a collaborator (store, hashing, signing,
 *   upstream HTTP) → 500 with a generic message
 *
 * Internal detail from collaborator errors is logged, never sent.
 */

use thiserror::Error;
use axum::http::StatusCode;

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::{AuthError, TokenError};
use crate::shared::FieldError;

/// Message sent for every 5xx response
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use devconnector::backend::error::ApiError;
///
/// let err = ApiError::not_found("Post not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// No `x-auth-token` header on a protected route
    #[error("No token, authorization denied")]
    MissingToken,

    /// Token failed signature, expiry or payload checks
    #[error("Token is not valid")]
    InvalidToken,

    /// Request body failed validation
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// Request was well-formed but rejected by a business rule
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authenticated caller does not own the resource
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Password hashing failure
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Upstream HTTP failure (GitHub proxy)
    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Any other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => Self::MissingToken,
            AuthError::InvalidToken => Self::InvalidToken,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {}", err))
    }
}

impl ApiError {
    /// Validation failure on a single field
    pub fn field(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(param, msg)])
    }

    /// Validation-shaped failure not tied to a field
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::general(msg)])
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_authorized(msg: impl Into<String>) -> Self {
        Self::NotAuthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken | Self::NotAuthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_)
            | Self::Token(_)
            | Self::Password(_)
            | Self::Upstream(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    ///
    /// Server errors collapse to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::MissingToken | Self::InvalidToken => self.to_string(),
            Self::BadRequest(msg) | Self::NotAuthorized(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Validation(errors) => errors
                .first()
                .map(|e| e.msg.clone())
                .unwrap_or_default(),
            _ => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}
