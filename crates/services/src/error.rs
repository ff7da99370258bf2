//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use trivia_core::model::{AttemptSummaryError, QuizError, QuizId};

/// Errors emitted by quiz sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSourceError {
    #[error("quiz not found: {0}")]
    NotFound(QuizId),
    #[error("no quizzes available")]
    Empty,
    #[error("quiz id {0} appears more than once")]
    DuplicateId(QuizId),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid quiz JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Summary(#[from] AttemptSummaryError),
    #[error(transparent)]
    Source(#[from] QuizSourceError),
}
