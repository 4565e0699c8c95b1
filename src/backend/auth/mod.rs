//! Authentication Module
//!
//! This module handles user registration, login and bearer tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── passwords.rs    - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── register.rs - User registration handler
//!     └── login.rs    - User authentication handler
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage and never serialized
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after 24 hours by default (`TOKEN_TTL_HOURS`)
//! - Invalid credentials return 401 (no information leakage)

/// Password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, register};
pub use passwords::PasswordHasher;
pub use sessions::{Claims, TokenKeys};
