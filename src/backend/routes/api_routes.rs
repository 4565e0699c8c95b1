/**
 * API Route Table
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - User login
 *
 * ## Users
 * - `GET /users` - List users with their posts
 * - `GET /users/profile/me` - Caller's profile (requires authentication)
 * - `GET /users/{id}` - User with posts and comments
 * - `PUT /users/{id}` - Update own account (requires authentication)
 * - `DELETE /users/{id}` - Delete own account (requires authentication)
 *
 * ## Posts
 * - `GET /posts` - Paginated, newest first
 * - `POST /posts` - Create (requires authentication)
 * - `GET /posts/{id}` - Post with author and comments
 * - `PUT /posts/{id}` - Author-only update
 * - `DELETE /posts/{id}` - Author-only delete
 * - `POST /posts/{id}/like`, `POST /posts/{id}/unlike` - Like counter
 *
 * ## Comments
 * - `GET /posts/{id}/comments` - Oldest first
 * - `POST /posts/{id}/comments` - Add (requires authentication)
 * - `DELETE /comments/{id}` - Author-only delete
 *
 * Public and protected methods share paths; protected handlers take the
 * `AuthUser` extractor, which answers 401 on its own.
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{login, register};
use crate::backend::comments::handlers as comments;
use crate::backend::posts::handlers as posts;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as users;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // User endpoints
        .route("/users", get(users::list_users))
        .route("/users/profile/me", get(users::get_profile))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Post endpoints
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/{id}/like", post(posts::like_post))
        .route("/posts/{id}/unlike", post(posts::unlike_post))
        // Comment endpoints
        .route(
            "/posts/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/comments/{id}", delete(comments::delete_comment))
}
