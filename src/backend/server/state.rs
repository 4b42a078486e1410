/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds everything a handler may need:
 * - The store connection pool
 * - The token service (signing secret, read-only after startup)
 * - The GitHub API client
 *
 * Every field is cheap to clone and safe to share across threads; there
 * is no mutable in-process state.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part of the
 * state they use, e.g. `State(pool): State<SqlitePool>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenService;
use crate::backend::profile::github::GithubClient;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Store connection pool
    pub db_pool: SqlitePool,

    /// Token issuer and verifier
    pub tokens: Arc<TokenService>,

    /// GitHub API client for the repository proxy
    pub github: GithubClient,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, tokens: TokenService, github: GithubClient) -> Self {
        Self {
            db_pool,
            tokens: Arc::new(tokens),
            github,
        }
    }
}

/// Implement FromRef for SqlitePool
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for the token service
impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

/// Implement FromRef for GithubClient
impl FromRef<AppState> for GithubClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.github.clone()
    }
}
