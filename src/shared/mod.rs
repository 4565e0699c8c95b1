//! Shared Types
//!
//! Types that travel over the wire between the API and its clients.

/// Users, posts, comments and pagination bodies
pub mod blog;

pub use blog::{MessageResponse, PageParams, Paginated};
