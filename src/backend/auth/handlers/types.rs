/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login and
 * current-user handlers.
 *
 * Request fields are optional at the serde level so a missing field is
 * reported through the validator as a field error, not as a JSON
 * rejection.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

/// Register request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name
    pub name: Option<String>,
    /// Email address, unique across users
    pub email: Option<String>,
    /// Plaintext password (hashed before storage)
    pub password: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by register and login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: user.created_at,
        }
    }
}
