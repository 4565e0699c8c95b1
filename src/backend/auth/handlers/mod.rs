//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`register`** - POST /auth/register - User registration
//! - **`login`** - POST /auth/login - Email and password login, returns a bearer token
//!
//! # Authentication Flow
//!
//! 1. **Register**: User provides profile fields and a password → User created (no token)
//! 2. **Login**: User provides email and password → Credentials verified → JWT returned
//! 3. **Protected routes**: Client sends `Authorization: Bearer <token>`

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

pub use login::login;
pub use register::register;
