/**
 * DevConnector Server Entry Point
 *
 * Loads `.env`, configures tracing, builds the app and serves it. Any
 * startup failure exits with status 1.
 */

use std::net::SocketAddr;

use devconnector::backend::server::config::load_config;
use devconnector::backend::server::{create_app, StartupError};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run().await {
        tracing::error!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = load_config()?;
    let app = create_app(&config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started on port {}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
