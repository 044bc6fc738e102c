//! Quiz Error Types
//!
//! Quiz-specific error variants integrating with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
#[derive(Debug, Error)]
pub enum QuizError {
    /// Question not found (or not owned by the caller)
    #[error("Question not found")]
    QuestionNotFound,

    /// Category not found (by id or by name filter)
    #[error("Category not found")]
    CategoryNotFound,

    /// The player already answered this question
    #[error("Question already answered")]
    AlreadyAnswered,

    /// No unanswered questions remain for the player
    #[error("No more questions available")]
    NoMoreQuestions,

    /// Options list is empty
    #[error("Question must have at least one option")]
    EmptyOptions,

    /// Correct-answer index falls outside the options list
    #[error("Correct answer index {index} is out of bounds for {len} options")]
    InvalidCorrectAnswer { index: usize, len: usize },

    /// Answer index falls outside the options list
    #[error("Answer index {index} is out of bounds for {len} options")]
    InvalidAnswer { index: usize, len: usize },

    /// Difficulty outside 1..=5
    #[error("Difficulty must be between 1 and 5 (got {0})")]
    InvalidDifficulty(i16),

    /// A question cannot be related to itself
    #[error("A question cannot be related to itself")]
    SelfRelation,

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

impl QuizError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::QuestionNotFound
            | QuizError::CategoryNotFound
            | QuizError::NoMoreQuestions => ErrorKind::NotFound,
            QuizError::AlreadyAnswered
            | QuizError::EmptyOptions
            | QuizError::InvalidCorrectAnswer { .. }
            | QuizError::InvalidAnswer { .. }
            | QuizError::InvalidDifficulty(_)
            | QuizError::SelfRelation => ErrorKind::BadRequest,
            QuizError::Timeout => ErrorKind::RequestTimeout,
            QuizError::Database(_) | QuizError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuizError::Database(e) => {
                tracing::error!(error = %e, "Quiz database error");
            }
            QuizError::Internal(msg) => {
                tracing::error!(message = %msg, "Quiz internal error");
            }
            QuizError::Timeout => {
                tracing::error!("Quiz store operation timed out");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz error");
            }
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for QuizError {
    fn from(err: AppError) -> Self {
        QuizError::Internal(err.to_string())
    }
}
