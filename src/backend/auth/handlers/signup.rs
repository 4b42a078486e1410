/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/users.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Check if user already exists
 * 3. Hash password using bcrypt
 * 4. Create user in database (avatar derived from the email)
 * 5. Issue a token for the new user
 *
 * # Validation
 *
 * - Name must not be blank
 * - Email must be a syntactically valid address
 * - Password must be 6 characters or more, and at most 72 bytes
 * - Email must be unique, compared case-insensitively
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{RegisterRequest, TokenResponse};
use crate::backend::auth::password::{hash_blocking, MAX_PASSWORD_BYTES};
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{create_user, get_user_by_email, is_unique_violation};
use crate::backend::error::ApiError;
use crate::shared::Validator;

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Field validation failed, or the email is taken
/// * `500 Internal Server Error` - Hashing, storage or signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/users HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "A", "email": "a@x.com", "password": "secret1" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn register(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    Validator::new()
        .required("name", request.name.as_deref(), "Name is required")
        .email("email", request.email.as_deref(), "Please include a valid email")
        .length(
            "password",
            request.password.as_deref(),
            MIN_PASSWORD_CHARS,
            MAX_PASSWORD_BYTES,
            "Please enter a password with 6 or more characters",
        )
        .finish()
        .map_err(ApiError::Validation)?;

    let name = request.name.unwrap_or_default().trim().to_string();
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    if get_user_by_email(&pool, &email).await?.is_some() {
        tracing::warn!("Registration for existing email: {}", email);
        return Err(ApiError::rejected("User already exists"));
    }

    let password_hash = hash_blocking(password).await??;

    // Two concurrent registrations can both pass the lookup above
    let user = create_user(&pool, name, email, password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::rejected("User already exists")
            } else {
                ApiError::from(e)
            }
        })?;

    let token = tokens.issue(user.id)?;

    tracing::info!("User registered: {} ({})", user.id, user.email);

    Ok(Json(TokenResponse { token }))
}
