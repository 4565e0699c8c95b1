//! Common test utilities and helpers
//!
//! - Test application fixture over an in-memory database
//! - Authentication helpers driving the HTTP API
//! - Error response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
