//! Test application fixture
//!
//! Every test gets its own in-memory SQLite database behind a full router,
//! so tests never share rows.

use axum_test::TestServer;
use blog_api::backend::auth::{PasswordHasher, TokenKeys};
use blog_api::backend::routes::create_router;
use blog_api::backend::server::config::open_database;
use blog_api::backend::server::AppState;
use chrono::Duration;

pub const TEST_SECRET: &str = "test-secret";

/// Lowest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

/// Running application under test
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Build a fresh application over an empty in-memory database
    pub async fn new() -> Self {
        let pool = open_database("sqlite::memory:", 1)
            .await
            .expect("Failed to open test database");
        let state = AppState::new(
            pool,
            TokenKeys::new(TEST_SECRET, Duration::hours(24)),
            PasswordHasher::new(TEST_BCRYPT_COST).expect("Failed to create password hasher"),
        );
        let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");
        Self { server, state }
    }
}
