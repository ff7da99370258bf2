use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId};
use crate::model::question::{Question, QuestionDraft, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {index} is invalid: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// A generated trivia quiz as delivered to the client.
///
/// On the wire the questions live under `content`, next to the `quizId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    #[serde(rename = "quizId", default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<QuizId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Vec<QuestionDraft>,
}

impl QuizDraft {
    /// Validate every question and assign ids from their positions.
    ///
    /// A draft without `quizId` gets a freshly generated one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Question` for the first invalid question.
    pub fn validate(self) -> Result<Quiz, QuizError> {
        let questions = self
            .content
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate(QuestionId::from_index(index))
                    .map_err(|source| QuizError::Question { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Quiz {
            id: self.quiz_id.unwrap_or_else(QuizId::generate),
            title: self.title.filter(|t| !t.trim().is_empty()),
            questions,
        })
    }
}

/// A validated quiz with a fixed, ordered question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: Option<String>,
    questions: Vec<Question>,
}

impl Quiz {
    /// Build a quiz directly from question drafts.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Question` for the first invalid question.
    pub fn new(
        id: QuizId,
        title: Option<String>,
        questions: Vec<QuestionDraft>,
    ) -> Result<Self, QuizError> {
        QuizDraft {
            quiz_id: Some(id),
            title,
            content: questions,
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
