//! Comments Module
//!
//! - **`db`** - Comment store over the `comments` table
//! - **`handlers`** - comment HTTP handlers under `/posts/{post_id}/comments` and `/comments`

pub mod db;
pub mod handlers;

pub use db::Comment;
