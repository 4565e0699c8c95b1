/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds everything a request needs:
 * - the SQLite connection pool
 * - the token signing keys
 * - the password hasher (bcrypt cost and dummy hash)
 *
 * None of it is mutated after startup, so cloning the state per request is
 * a handful of reference-count bumps.
 *
 * # Example
 *
 * ```rust,no_run
 * use blog_api::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _pool = &state.db;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::sessions::TokenKeys;

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// SQLite connection pool
    pub db: SqlitePool,
    /// Bearer token keys
    pub tokens: Arc<TokenKeys>,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(db: SqlitePool, tokens: TokenKeys, passwords: PasswordHasher) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            passwords,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(state: &AppState) -> Self {
        state.passwords.clone()
    }
}
