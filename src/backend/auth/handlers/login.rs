/**
 * Login Handler
 *
 * This module implements the login handler for POST /api/auth.
 *
 * An unknown email and a wrong password produce the same response, so a
 * caller cannot probe which addresses are registered.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::password::compare_blocking;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::ApiError;
use crate::shared::Validator;

const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Validation failed, or `Invalid Credentials`
/// * `500 Internal Server Error` - Storage, hashing or signing failed
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    Validator::new()
        .email("email", request.email.as_deref(), "Please include a valid email")
        .exists("password", request.password.as_deref(), "Password is required")
        .finish()
        .map_err(ApiError::Validation)?;

    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let Some(user) = get_user_by_email(&pool, &email).await? else {
        tracing::warn!("Login for unknown email");
        return Err(ApiError::rejected(INVALID_CREDENTIALS));
    };

    if !compare_blocking(password, user.password_hash).await?? {
        tracing::warn!("Wrong password for user {}", user.id);
        return Err(ApiError::rejected(INVALID_CREDENTIALS));
    }

    let token = tokens.issue(user.id)?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::hash;
    use crate::backend::auth::users::create_user;
    use crate::backend::server::config::connect_in_memory;

    async fn setup() -> (SqlitePool, Arc<TokenService>) {
        let pool = connect_in_memory().await.unwrap();
        create_user(&pool, "A".into(), "a@x.com".into(), hash("secret1").unwrap())
            .await
            .unwrap();
        (pool, Arc::new(TokenService::new("secret", 3600)))
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let (pool, tokens) = setup().await;
        let user = get_user_by_email(&pool, "a@x.com").await.unwrap().unwrap();

        let Json(response) = login(State(pool), State(tokens.clone()), Json(request("A@x.com", "secret1")))
            .await
            .unwrap();
        assert_eq!(tokens.verify(Some(&response.token)).unwrap(), user.id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_alike() {
        let (pool, tokens) = setup().await;

        let wrong = login(State(pool.clone()), State(tokens.clone()), Json(request("a@x.com", "nope")))
            .await
            .unwrap_err();
        let unknown = login(State(pool), State(tokens), Json(request("b@x.com", "secret1")))
            .await
            .unwrap_err();

        assert_eq!(wrong.status_code(), unknown.status_code());
        assert_eq!(wrong.message(), INVALID_CREDENTIALS);
        assert_eq!(unknown.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_missing_password() {
        let (pool, tokens) = setup().await;
        let err = login(
            State(pool),
            State(tokens),
            Json(LoginRequest { email: Some("a@x.com".into()), password: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "Password is required");
    }
}
