//! Blog Wire Types
//!
//! Request and response bodies for the users, posts and comments endpoints.
//! Request structs carry their validation rules as `validator` derives, so a
//! handler checks a body with a single `validate()` call.
//!
//! # Usage
//!
//! ```rust
//! use blog_api::shared::blog::{CreatePostRequest, PageParams};
//! use validator::Validate;
//!
//! let request = CreatePostRequest {
//!     title: "Hello world".to_string(),
//!     content: "My very first post".to_string(),
//!     image_url: None,
//! };
//! assert!(request.validate().is_ok());
//! assert_eq!(PageParams::default().page_size(), 10);
//! ```

pub mod comment;
pub mod pagination;
pub mod post;
pub mod user;

use serde::{Deserialize, Serialize};

pub use comment::{CommentResponse, CommentSummary, CreateCommentRequest};
pub use pagination::{PageParams, Paginated, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use post::{CreatePostRequest, PostResponse, PostSummary, UpdatePostRequest};
pub use user::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateUserRequest, UserProfileResponse,
    UserResponse, UserWithPosts,
};

/// Plain confirmation body, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
