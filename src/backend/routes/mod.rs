//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, tracing layer, fallback
//! ├── api_routes.rs   - Auth, user, post and comment routes
//! └── status.rs       - Liveness banner and endpoint directory
//! ```

/// Main router creation
pub mod router;

/// API route table
pub mod api_routes;

/// Liveness and status handlers
pub mod status;

pub use router::create_router;
