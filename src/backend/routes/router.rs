/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Status routes (`/`, `/api/status`)
 * 2. API routes (auth, users, posts, comments)
 * 3. Fallback handler (JSON 404)
 *
 * Every request runs inside a `TraceLayer` span.
 */

use axum::{http::Uri, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::status::{api_status, root};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/", get(root))
        .route("/api/status", get(api_status));

    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|uri: Uri| async move {
        BackendError::not_found(format!("Cannot find {}", uri.path()))
    });

    router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
