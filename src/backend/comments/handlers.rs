//! Comment Handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::comments::db;
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, ValidJson, ValidPath};
use crate::backend::server::state::AppState;
use crate::shared::blog::{CommentResponse, CreateCommentRequest, MessageResponse};

/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    ValidPath(post_id): ValidPath<Uuid>,
) -> BackendResult<Json<Vec<CommentResponse>>> {
    Ok(Json(db::find_by_post_id(&state.db, post_id).await?))
}

/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(post_id): ValidPath<Uuid>,
    ValidJson(fields): ValidJson<CreateCommentRequest>,
) -> BackendResult<(StatusCode, Json<CommentResponse>)> {
    let comment = db::create_comment(&state.db, post_id, &fields, auth.id()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<MessageResponse>> {
    db::delete_comment(&state.db, id, auth.id()).await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
