//! Users Module
//!
//! - **`db`** - User store over the `users` table
//! - **`handlers`** - `/users` HTTP handlers

pub mod db;
pub mod handlers;

pub use db::User;
