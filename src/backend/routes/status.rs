//! Liveness and endpoint directory

use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Blog API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// GET /api/status
pub async fn api_status() -> Json<Value> {
    Json(json!({
        "status": "active",
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": {
            "auth": {
                "register": "POST /auth/register",
                "login": "POST /auth/login",
            },
            "users": {
                "listAll": "GET /users",
                "getById": "GET /users/:id",
                "getCurrentUser": "GET /users/profile/me",
                "update": "PUT /users/:id",
                "delete": "DELETE /users/:id",
            },
            "posts": {
                "listAll": "GET /posts",
                "getById": "GET /posts/:id",
                "create": "POST /posts",
                "update": "PUT /posts/:id",
                "delete": "DELETE /posts/:id",
                "like": "POST /posts/:id/like",
                "unlike": "POST /posts/:id/unlike",
            },
            "comments": {
                "getByPost": "GET /posts/:postId/comments",
                "create": "POST /posts/:postId/comments",
                "delete": "DELETE /comments/:id",
            },
        },
    }))
}
