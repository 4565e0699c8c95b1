//! User Handlers
//!
//! HTTP handlers for `/users`. Listing and lookup are public; the profile,
//! update and delete routes need a bearer token, and update and delete only
//! act on the caller's own account.

use axum::{
    extract::State,
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AuthUser, ValidJson, ValidPath, ValidQuery};
use crate::backend::server::state::AppState;
use crate::backend::users::db;
use crate::shared::blog::{
    MessageResponse, PageParams, UpdateUserRequest, UserProfileResponse, UserWithPosts,
};

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> BackendResult<Json<Vec<UserWithPosts>>> {
    let users = db::find_all(&state.db, &params).await?;
    tracing::debug!("Listed {} users (page {})", users.len(), params.page());
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<UserProfileResponse>> {
    db::find_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| db::user_not_found(id))
}

/// GET /users/profile/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> BackendResult<Json<UserProfileResponse>> {
    tracing::info!("Profile request from: {}", auth.0.email);
    db::find_by_id(&state.db, auth.id())
        .await?
        .map(Json)
        .ok_or_else(|| db::user_not_found(auth.id()))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(changes): ValidJson<UpdateUserRequest>,
) -> BackendResult<Json<UserProfileResponse>> {
    ensure_self(&auth, id, "update")?;
    let user = db::update_user(&state.db, id, &changes).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> BackendResult<Json<MessageResponse>> {
    ensure_self(&auth, id, "delete")?;
    db::delete_user(&state.db, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

fn ensure_self(auth: &AuthUser, id: Uuid, action: &str) -> BackendResult<()> {
    if auth.id() != id {
        tracing::warn!("User {} tried to {} account {}", auth.id(), action, id);
        return Err(BackendError::forbidden(format!(
            "You are not authorized to {action} this user"
        )));
    }
    Ok(())
}
