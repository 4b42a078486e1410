//! DevConnector - Backend Library
//!
//! REST API for a small developer social network: accounts, developer
//! profiles, and a post feed with likes and comments.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire error shapes, request validation, configuration
//! - **`backend`** - Axum server, store access and HTTP handlers
//!
//! # Authentication
//!
//! Register (`POST /api/users`) or log in (`POST /api/auth`) to receive a
//! signed token, then send it in the `x-auth-token` header on protected
//! routes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use devconnector::backend::server::create_app;
//! use devconnector::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod shared;
pub mod backend;
