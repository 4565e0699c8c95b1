/**
 * Server Initialization
 *
 * This module builds the application state from the configuration and
 * hands it to the router.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and apply the schema
 * 2. Derive the token keys from `JWT_SECRET`
 * 3. Prepare the password hasher (bcrypt cost and dummy hash)
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::sessions::TokenKeys;
use crate::backend::error::BackendResult;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{open_database, AppConfig};
use crate::backend::server::state::AppState;

/// Build the shared application state
///
/// Fails when the database cannot be opened or the schema cannot be applied.
/// Nothing is retried: the server does not start without its store.
pub async fn build_state(config: &AppConfig) -> BackendResult<AppState> {
    let db = open_database(&config.database_url, config.max_connections).await?;
    let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl());

    let bcrypt_cost = config.bcrypt_cost;
    let passwords = tokio::task::spawn_blocking(move || PasswordHasher::new(bcrypt_cost)).await??;

    tracing::info!(
        bcrypt_cost,
        token_ttl_hours = config.token_ttl_hours,
        "Application state ready"
    );
    Ok(AppState::new(db, tokens, passwords))
}

/// Create and configure the Axum application
pub async fn create_app(config: &AppConfig) -> BackendResult<Router<()>> {
    tracing::info!("Initializing blog API server");
    let state = build_state(config).await?;
    let app = create_router(state);
    tracing::info!("Router configured");
    Ok(app)
}
