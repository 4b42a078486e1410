/**
 * Server Configuration
 *
 * This module loads the application configuration from the environment
 * and opens the store.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (after `.env` has been
 * loaded by the binary), with defaults for local development where a
 * sensible one exists. The signing secret has no default.
 *
 * # Error Handling
 *
 * Unlike optional integrations, the store is mandatory: failure to open it
 * is returned to the caller, and the binary exits with status 1.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::shared::{AppConfig, ConfigError};

/// Load configuration from the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Open the store and run migrations
///
/// This function:
/// 1. Parses `database_url` into connection options
/// 2. Creates a connection pool
/// 3. Runs database migrations
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Open a private in-memory store with the schema applied
///
/// The pool holds exactly one connection that never expires, since every
/// SQLite in-memory connection is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_has_schema() {
        let pool = connect_in_memory().await.unwrap();
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'profiles', 'posts') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["posts", "profiles", "users"]);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        assert!(run_migrations(&pool).await.is_ok());
    }
}
