//! Users Error Types
//!
//! This module provides users-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Users-specific result type alias
pub type UsersResult<T> = Result<T, UsersError>;

/// Users-specific error variants
#[derive(Debug, Error)]
pub enum UsersError {
    /// User not found (covers follow targets; message names the role)
    #[error("{0} not found")]
    UserNotFound(&'static str),

    /// Handle already exists
    #[error("Handle already exists")]
    HandleTaken,

    /// Invalid credentials (unknown handle or wrong password)
    #[error("Invalid handle or password")]
    InvalidCredentials,

    /// Authorization header missing
    #[error("Missing bearer token")]
    MissingToken,

    /// Token malformed or signature invalid
    #[error("Invalid token")]
    TokenInvalid,

    /// Token expired
    #[error("Token has expired")]
    TokenExpired,

    /// Authenticated but role does not permit the operation
    #[error("Access denied")]
    Forbidden,

    /// Users cannot follow themselves
    #[error("Cannot follow yourself")]
    SelfFollow,

    /// Handle validation error
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Unknown role code in a request
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Store call exceeded its time budget
    #[error("Store operation timed out")]
    Timeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UsersError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            UsersError::UserNotFound(_) => ErrorKind::NotFound,
            UsersError::HandleTaken => ErrorKind::Conflict,
            UsersError::InvalidCredentials
            | UsersError::MissingToken
            | UsersError::TokenInvalid
            | UsersError::TokenExpired => ErrorKind::Unauthorized,
            UsersError::Forbidden => ErrorKind::Forbidden,
            UsersError::SelfFollow
            | UsersError::InvalidHandle(_)
            | UsersError::PasswordValidation(_)
            | UsersError::InvalidRole(_) => ErrorKind::BadRequest,
            UsersError::Timeout => ErrorKind::RequestTimeout,
            UsersError::Database(_) | UsersError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            UsersError::Database(e) => {
                tracing::error!(error = %e, "Users database error");
            }
            UsersError::Internal(msg) => {
                tracing::error!(message = %msg, "Users internal error");
            }
            UsersError::Timeout => {
                tracing::error!("Users store operation timed out");
            }
            UsersError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            UsersError::TokenInvalid => {
                tracing::warn!("Rejected invalid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Users error");
            }
        }
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for UsersError {
    fn from(err: AppError) -> Self {
        UsersError::Internal(err.to_string())
    }
}
