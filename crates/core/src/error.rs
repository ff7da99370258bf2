use thiserror::Error;

use crate::model::{AttemptSummaryError, QuestionError, QuizError, RequestError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Attempt(#[from] AttemptSummaryError),
}
