/**
 * Router Configuration
 *
 * Assembles the public and protected route tables into the application
 * router and wraps it in request tracing.
 */

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::server::state::AppState;
use crate::shared::MessageBody;

/// Liveness check
async fn api_running() -> &'static str {
    "API Running"
}

async fn not_found() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::NOT_FOUND, Json(MessageBody::new("Not found")))
}

/// Create the Axum router with all routes configured
///
/// Public and protected tables may share a path (`/api/auth`,
/// `/api/profile`) as long as they register different methods.
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(api_running))
        .merge(public_routes())
        .merge(protected_routes(app_state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
