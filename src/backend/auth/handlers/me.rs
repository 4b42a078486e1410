/**
 * Get Current User Handler
 *
 * GET /api/auth returns the user named by the verified token. The
 * middleware has already authenticated the request; this handler only
 * loads the record.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid token (from the middleware)
/// * `404 Not Found` - The token outlived its user
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "name": "A",
///   "email": "a@x.com",
///   "avatar": "https://www.gravatar.com/avatar/...",
///   "date": "2024-01-01T00:00:00Z"
/// }
/// ```
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for deleted user {}", auth.user_id);
            ApiError::not_found("User not found")
        })?;

    Ok(Json(user.into()))
}
