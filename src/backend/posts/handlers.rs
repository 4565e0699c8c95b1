//! Post Handlers
//!
//! HTTP handlers for `/posts`. Reads are public. Writes take the author from
//! the bearer token, never from the request body.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, ValidJson, ValidPath, ValidQuery};
use crate::backend::posts::db;
use crate::backend::server::state::AppState;
use crate::shared::blog::{
    CreatePostRequest, MessageResponse, PageParams, Paginated, PostResponse, UpdatePostRequest,
};

/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> BackendResult<Json<Paginated<PostResponse>>> {
    let page = db::find_all(&state.db, &params).await?;
    tracing::debug!("Listed page {} of {} posts", page.page, page.total);
    Ok(Json(page))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<PostResponse>> {
    Ok(Json(db::find_by_id(&state.db, id).await?))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(fields): ValidJson<CreatePostRequest>,
) -> BackendResult<(StatusCode, Json<PostResponse>)> {
    let post = db::create_post(&state.db, &fields, auth.id()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<UpdatePostRequest>,
) -> BackendResult<Json<PostResponse>> {
    let post = db::update_post(&state.db, id, &changes, auth.id()).await?;
    Ok(Json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<MessageResponse>> {
    db::delete_post(&state.db, id, auth.id()).await?;
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}

/// POST /posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<PostResponse>> {
    tracing::debug!("User {} likes post {}", auth.id(), id);
    Ok(Json(db::toggle_like(&state.db, id, true).await?))
}

/// POST /posts/{id}/unlike
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<PostResponse>> {
    tracing::debug!("User {} unlikes post {}", auth.id(), id);
    Ok(Json(db::toggle_like(&state.db, id, false).await?))
}
