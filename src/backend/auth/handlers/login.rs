/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * An unknown email and a wrong password produce the same 401 response, and
 * both cost one bcrypt verification.
 */
use axum::{extract::State, response::Json};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::ValidJson;
use crate::backend::server::state::AppState;
use crate::backend::users;
use crate::shared::blog::{AuthResponse, LoginRequest, UserResponse};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body fails validation
/// * `401 Unauthorized` - If the email is unknown or the password is wrong
/// * `500 Internal Server Error` - If the database, bcrypt or token signing fails
///
/// # Example Request
///
/// ```http
/// POST /auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "john@example.com",
///   "password": "secretPassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": "...", "username": "john", "email": "john@example.com", ... }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> BackendResult<Json<AuthResponse>> {
    tracing::info!("Login request for: {}", request.email);

    let Some(user) = users::db::find_by_email(&state.db, &request.email).await? else {
        state.passwords.verify_dummy(&request.password).await?;
        tracing::warn!("User not found: {}", request.email);
        return Err(BackendError::InvalidCredentials);
    };

    if !state
        .passwords
        .verify(&request.password, &user.password_hash)
        .await?
    {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::InvalidCredentials);
    }

    let access_token = state.tokens.create_token(user.id, &user.email)?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        access_token,
        user: UserResponse::from(user),
    }))
}
