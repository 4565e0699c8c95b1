/**
 * Backend Error Types
 *
 * This module defines the error type returned by stores and HTTP handlers.
 * Every variant maps to one HTTP status code and can be converted into a
 * JSON response (see `conversion.rs`).
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - malformed or missing input fields
 * - `BadRequest` - domain rule violations (e.g. unliking a post with 0 likes)
 * - `InvalidCredentials` - login failure (unknown email or wrong password)
 * - `InvalidToken` - missing, malformed or expired bearer token
 * - `Forbidden` - authenticated caller does not own the resource
 * - `NotFound` - referenced entity is absent
 * - `Conflict` - username or email already taken
 *
 * ## Server Errors
 *
 * Database, hashing and token signing failures. Their details are logged
 * but never sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

/// Backend error type
///
/// # Usage
///
/// ```rust
/// use blog_api::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Post with ID 42 not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Input failed validation before reaching any store
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Domain rule violation
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Unknown email or wrong password; the two cases are deliberately identical
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired or naming a deleted user
    #[error("Invalid or missing token")]
    InvalidToken,

    /// Caller is authenticated but does not own the resource
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Referenced entity does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Uniqueness violation
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token signing error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Any other server-side failure (e.g. a panicked blocking task)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `BadRequest` - 400 Bad Request
    /// - `InvalidCredentials`, `InvalidToken` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the client-facing error message
    ///
    /// Server errors collapse to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::BadRequest { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::InvalidCredentials | Self::InvalidToken => self.to_string(),
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Whether this error is the server's fault rather than the caller's
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<ValidationErrors> for BackendError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        Self::validation(messages.join("; "))
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("blocking task failed: {err}"))
    }
}

/// Translate a write failure into a domain error
///
/// Unique-constraint violations become `Conflict` with the given message and
/// foreign-key violations become `NotFound`; anything else stays a database error.
pub fn map_write_error(err: sqlx::Error, conflict: &str, missing: &str) -> BackendError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return BackendError::conflict(conflict);
        }
        if db_err.is_foreign_key_violation() {
            return BackendError::not_found(missing);
        }
    }
    BackendError::Database(err)
}
