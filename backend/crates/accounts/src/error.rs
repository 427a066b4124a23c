//! Accounts Error Types
//!
//! This module provides accounts-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Accounts-specific result type alias
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Accounts-specific error variants
#[derive(Debug, Error)]
pub enum AccountsError {
    /// Referenced user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Email is already registered
    #[error("User already exists")]
    EmailTaken,

    /// Login attempt with an unregistered email
    ///
    /// Distinct from [`AccountsError::UserNotFound`]: the login route
    /// reports this as 400, matching the rest of the login failures.
    #[error("User not found")]
    UnknownEmail,

    /// Login attempt with a wrong password
    #[error("Invalid password")]
    InvalidPassword,

    /// Authorization header missing or not a bearer token
    #[error("Access denied")]
    Unauthenticated,

    /// Bearer token failed decoding, signature, or expiry checks
    #[error("Invalid token")]
    TokenRejected,

    /// Attempt to follow oneself
    #[error("You cannot follow yourself")]
    SelfFollow,

    /// Follow requested but the edge already exists
    #[error("You are already following this user")]
    AlreadyFollowing,

    /// Unfollow requested but no edge exists
    #[error("You are not following this user")]
    NotFollowing,

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountsError::UserNotFound => StatusCode::NOT_FOUND,
            AccountsError::EmailTaken
            | AccountsError::UnknownEmail
            | AccountsError::InvalidPassword
            | AccountsError::TokenRejected
            | AccountsError::SelfFollow
            | AccountsError::AlreadyFollowing
            | AccountsError::NotFollowing
            | AccountsError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountsError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::UserNotFound => ErrorKind::NotFound,
            AccountsError::EmailTaken
            | AccountsError::UnknownEmail
            | AccountsError::InvalidPassword
            | AccountsError::TokenRejected
            | AccountsError::SelfFollow
            | AccountsError::AlreadyFollowing
            | AccountsError::NotFollowing
            | AccountsError::Validation(_) => ErrorKind::BadRequest,
            AccountsError::Unauthenticated => ErrorKind::Unauthorized,
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::Internal(msg) => {
                tracing::error!(message = %msg, "Accounts internal error");
            }
            AccountsError::InvalidPassword | AccountsError::UnknownEmail => {
                tracing::warn!("Invalid login attempt");
            }
            AccountsError::TokenRejected => {
                tracing::warn!("Rejected access token");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountsError {
    fn from(err: AppError) -> Self {
        AccountsError::Internal(err.to_string())
    }
}
