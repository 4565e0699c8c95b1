//! Backend Module
//!
//! This module contains all server-side code: the Axum HTTP server, the
//! SQLite stores, authentication and error handling.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route table and router assembly
//! - **`auth`** - Password hashing, JWT tokens, register and login handlers
//! - **`users`** - User store and `/users` handlers
//! - **`posts`** - Post store (with the like counter) and `/posts` handlers
//! - **`comments`** - Comment store and comment handlers
//! - **`middleware`** - Authentication and validation extractors
//! - **`error`** - `BackendError` and its JSON response
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── users/          - Users
//! ├── posts/          - Posts and likes
//! ├── comments/       - Comments
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use blog_api::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication
pub mod auth;

/// User store and handlers
pub mod users;

/// Post store and handlers
pub mod posts;

/// Comment store and handlers
pub mod comments;

/// Request extractors
pub mod middleware;

pub use error::{BackendError, BackendResult};
pub use server::{create_app, AppState};
