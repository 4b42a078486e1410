/**
 * User Directory
 *
 * User records and the store operations the auth flow depends on:
 * lookup by email, lookup by id, and save.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: uuid::Uuid,
    /// Display name
    pub name: String,
    /// User email address (stored lower-cased)
    pub email: String,
    /// Gravatar URL derived from the email
    pub avatar: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Gravatar URL for an email: 200px, PG-rated, "mystery man" fallback
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!("https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm", digest)
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `email` - User email (normalised before storage)
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error. A duplicate email surfaces as a unique
/// violation from the store.
pub async fn create_user(
    pool: &SqlitePool,
    name: String,
    email: String,
    password_hash: String,
) -> Result<User, sqlx::Error> {
    let email = normalize_email(&email);
    let user = User {
        id: uuid::Uuid::new_v4(),
        avatar: gravatar_url(&email),
        name,
        email,
        password_hash,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, avatar, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.avatar)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, avatar, password_hash, created_at
        FROM users
        WHERE email = $1
        "#
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(
    pool: &SqlitePool,
    id: uuid::Uuid,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, avatar, password_hash, created_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a user record
///
/// Takes a connection rather than the pool so account removal can run it
/// inside the same transaction as the profile and post deletes.
///
/// # Returns
/// `true` if a row was removed
pub async fn delete_user(
    conn: &mut sqlx::SqliteConnection,
    id: uuid::Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// True if the error is the store rejecting a duplicate key
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
