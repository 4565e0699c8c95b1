//! Server Module
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration and database pool
//! ├── schema.sql      - Table definitions applied at startup
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env()` reads the environment
//! 2. **Database**: the pool is opened and `schema.sql` applied
//! 3. **State Creation**: token keys and password hasher join the pool in `AppState`
//! 4. **Router Creation**: all routes, the tracing layer and the fallback

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{AppConfig, ConfigError};
pub use init::{build_state, create_app};
pub use state::AppState;
