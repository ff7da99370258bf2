use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::QuizId;
use crate::session::QuizResult;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct answers ({correct}) exceed question count ({total})")]
    CountMismatch { total: usize, correct: usize },

    #[error("score {0}% is out of range")]
    InvalidScore(u8),
}

/// Aggregate summary for one submitted attempt at a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptSummary {
    quiz_id: QuizId,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total_questions: usize,
    total_correct: usize,
    score_percent: u8,
}

impl AttemptSummary {
    /// Rehydrate a summary from stored values.
    ///
    /// # Errors
    ///
    /// Returns `AttemptSummaryError` if the time range is inverted, more answers
    /// are correct than there are questions, or the score exceeds 100.
    pub fn new(
        quiz_id: QuizId,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total_questions: usize,
        total_correct: usize,
        score_percent: u8,
    ) -> Result<Self, AttemptSummaryError> {
        if completed_at < started_at {
            return Err(AttemptSummaryError::InvalidTimeRange);
        }
        if total_correct > total_questions {
            return Err(AttemptSummaryError::CountMismatch {
                total: total_questions,
                correct: total_correct,
            });
        }
        if score_percent > 100 {
            return Err(AttemptSummaryError::InvalidScore(score_percent));
        }

        Ok(Self {
            quiz_id,
            started_at,
            completed_at,
            total_questions,
            total_correct,
            score_percent,
        })
    }

    /// Build a summary from a scored result.
    ///
    /// # Errors
    ///
    /// Returns `AttemptSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_result(
        quiz_id: QuizId,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        result: &QuizResult,
    ) -> Result<Self, AttemptSummaryError> {
        Self::new(
            quiz_id,
            started_at,
            completed_at,
            result.total_questions,
            result.total_correct,
            result.score_percent,
        )
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn total_correct(&self) -> usize {
        self.total_correct
    }

    #[must_use]
    pub fn score_percent(&self) -> u8 {
        self.score_percent
    }

    /// Time spent between opening the quiz and submitting it.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}
