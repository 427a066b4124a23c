//! Posts Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Posts-specific result type alias
pub type PostsResult<T> = Result<T, PostsError>;

/// Posts-specific error variants
#[derive(Debug, Error)]
pub enum PostsError {
    /// Referenced post does not exist
    #[error("Post not found")]
    PostNotFound,

    /// The actor already likes this post
    #[error("You have already liked this post")]
    AlreadyLiked,

    /// Deletion attempted by someone other than the author
    #[error("You are not authorized to delete this post")]
    NotPostAuthor,

    /// A feed query came back empty
    ///
    /// The API reports empty feeds as 404 rather than an empty list.
    #[error("No posts found")]
    NoPosts,

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

impl PostsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PostsError::PostNotFound | PostsError::NoPosts => StatusCode::NOT_FOUND,
            PostsError::AlreadyLiked | PostsError::Validation(_) => StatusCode::BAD_REQUEST,
            PostsError::NotPostAuthor => StatusCode::FORBIDDEN,
            PostsError::Database(_) | PostsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostsError::PostNotFound | PostsError::NoPosts => ErrorKind::NotFound,
            PostsError::AlreadyLiked | PostsError::Validation(_) => ErrorKind::BadRequest,
            PostsError::NotPostAuthor => ErrorKind::Forbidden,
            PostsError::Database(_) | PostsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PostsError::Database(e) => {
                tracing::error!(error = %e, "Posts database error");
            }
            PostsError::Internal(msg) => {
                tracing::error!(message = %msg, "Posts internal error");
            }
            PostsError::NotPostAuthor => {
                tracing::warn!("Rejected post deletion by non-author");
            }
            _ => {
                tracing::debug!(error = %self, "Posts error");
            }
        }
    }
}

impl IntoResponse for PostsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
