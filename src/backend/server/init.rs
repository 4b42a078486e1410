/**
 * Server Initialization
 *
 * This module builds the application state and the Axum router from a
 * loaded configuration.
 *
 * # Initialization Process
 *
 * 1. Open the store and run migrations
 * 2. Build the token service from the signing secret
 * 3. Build the GitHub client
 * 4. Create and configure the router
 *
 * Any failure here is fatal; the binary maps it to exit status 1.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::sessions::TokenService;
use crate::backend::profile::github::GithubClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::{AppConfig, ConfigError};

/// Fatal startup failure
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build application state around an already-open pool
pub fn build_state(config: &AppConfig, db_pool: sqlx::SqlitePool) -> Result<AppState, StartupError> {
    let tokens = TokenService::new(&config.jwt_secret, config.token_expiry_secs);
    let github = GithubClient::new(config)?;
    Ok(AppState::new(db_pool, tokens, github))
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests, or the reason startup
/// cannot continue.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing DevConnector backend server");

    let db_pool = load_database(&config.database_url).await?;
    let app_state = build_state(config, db_pool)?;

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
