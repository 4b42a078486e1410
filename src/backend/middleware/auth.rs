/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. It reads the
 * token from the `x-auth-token` header, verifies it, and places the
 * decoded user id into the request extensions for handlers.
 *
 * A request moves from unauthenticated to authenticated only through a
 * successful verification; otherwise it is answered with 401 immediately.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::{AuthError, TokenService};
use crate::backend::error::ApiError;

/// Header carrying the session token
pub const AUTH_HEADER: &str = "x-auth-token";

/// Authenticated user data extracted from the token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Read the raw token from request headers
///
/// An absent header is `Ok(None)`; a header that is not visible ASCII
/// cannot be a token and is rejected as invalid.
pub fn token_from_headers(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    match headers.get(AUTH_HEADER) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| {
            tracing::warn!("Non-ASCII {} header", AUTH_HEADER);
            AuthError::InvalidToken
        }),
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from the `x-auth-token` header
/// 2. Verifies signature and expiry
/// 3. Attaches the user id to request extensions
///
/// Returns 401 with `No token, authorization denied` or
/// `Token is not valid` otherwise.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_headers(request.headers())?;
    let user_id = tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), e);
        e
    })?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`; anywhere else it
/// rejects as if no token had been sent.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::MissingToken
            })?;

        Ok(AuthUser(user))
    }
}
