//! Middleware Module
//!
//! Request extractors that run before handlers.
//!
//! - **`auth`** - bearer token authentication (`AuthUser`)
//! - **`validation`** - JSON, query and path extractors that reject with `BackendError`

pub mod auth;
pub mod validation;

pub use auth::{AuthUser, AuthenticatedUser};
pub use validation::{ValidJson, ValidPath, ValidQuery};
