//! Blog API - Main Library
//!
//! A JSON HTTP API for a small blog: accounts with bcrypt-hashed passwords,
//! bearer-token (JWT) authentication, posts with a like counter, and
//! comments, stored in SQLite.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types (requests, responses, pagination)
//!   - `camelCase` JSON, `validator` rules on every request body
//!
//! - **`backend`** - Server-side code
//!   - Axum router and handlers
//!   - SQLite stores via `sqlx`
//!   - Authentication and error handling
//!
//! # Usage
//!
//! ```rust,no_run
//! use blog_api::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder()
//!     .database_url("sqlite://blog.db")
//!     .jwt_secret("change-me")
//!     .build()?;
//! let app = create_app(&config).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Stores and handlers return `BackendResult<T>`. Every `BackendError`
//! renders as `{"error": <message>, "status": <code>}`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
