/**
 * Registration Handler
 *
 * POST /auth/register creates an account and returns it without the
 * password hash. No token is issued; clients log in afterwards.
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::error::BackendResult;
use crate::backend::middleware::ValidJson;
use crate::backend::server::state::AppState;
use crate::backend::users;
use crate::shared::blog::{RegisterRequest, UserResponse};

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - If a field fails validation
/// * `409 Conflict` - If the username or email is already taken
pub async fn register(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> BackendResult<(StatusCode, Json<UserResponse>)> {
    tracing::info!("Registration request for: {} <{}>", request.username, request.email);

    let user = users::db::create_user(&state.db, &state.passwords, &request).await?;

    tracing::info!("User registered: {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}
