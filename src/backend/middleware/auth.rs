/**
 * Authentication Extractor
 *
 * Protected handlers take an `AuthUser` argument. The extractor reads the
 * bearer token from the Authorization header, verifies it, and checks that
 * the user it names still exists. Any failure rejects the request with
 * 401 before the handler runs.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users;

/// Authenticated user data extracted from the bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Axum extractor for the authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                BackendError::InvalidToken
            })?;

        let token = bearer_token(header).ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::InvalidToken
        })?;

        let claims = state.tokens.verify_token(token).map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            BackendError::InvalidToken
        })?;

        let user_id = claims.user_id().ok_or_else(|| {
            tracing::warn!("Token subject is not a user ID: {}", claims.sub);
            BackendError::InvalidToken
        })?;

        if !users::db::exists(&state.db, user_id).await? {
            tracing::warn!("Token names a user that no longer exists: {}", user_id);
            return Err(BackendError::InvalidToken);
        }

        Ok(AuthUser(AuthenticatedUser {
            user_id,
            email: claims.email,
        }))
    }
}
