//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Public messages are chosen in
//! [`AuthError::to_app_error`] only.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or invalid request input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Protected route reached without a token
    #[error("Access token is missing")]
    MissingToken,

    /// Token present but rejected (malformed, bad signature, expired, ...)
    #[error("Token is invalid")]
    InvalidToken,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Credential store failure
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Internal error (hashing, signing, task join, ...)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Store(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the client-facing AppError.
    ///
    /// Credential and token failures get one fixed message each, and 5xx
    /// details never leave the server.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();

        match self {
            AuthError::Validation(msg) => AppError::new(kind, msg.clone()),
            AuthError::InvalidCredentials => AppError::new(kind, "Invalid email or password"),
            AuthError::MissingToken => AppError::new(kind, "Authentication required"),
            AuthError::InvalidToken => AppError::new(kind, "invalid token"),
            AuthError::EmailTaken => AppError::new(kind, "Email already registered"),
            AuthError::Store(_) | AuthError::Internal(_) => {
                AppError::new(kind, "Internal server error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AuthError::InvalidToken,
            TokenError::MissingSecret | TokenError::Signing(_) | TokenError::Generation => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {}", err))
    }
}
