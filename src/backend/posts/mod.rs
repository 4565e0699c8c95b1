//! Posts Module
//!
//! - **`db`** - Post store over the `posts` table, including the like counter
//! - **`handlers`** - `/posts` HTTP handlers

pub mod db;
pub mod handlers;

pub use db::Post;
