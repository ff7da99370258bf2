use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("multiple choice question has no options")]
    MissingOptions,

    #[error("option label cannot be empty")]
    EmptyLabel,

    #[error("duplicate option label: {0}")]
    DuplicateLabel(String),
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Kind of question as produced by the trivia generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillInTheBlank,
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl QuestionOption {
    #[must_use]
    pub fn new(label: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Unvalidated question, in the shape the generator emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_type: QuestionType,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    /// Draft for a multiple choice question. `correct_answer` is derived from the
    /// correct option labels.
    #[must_use]
    pub fn multiple_choice(text: impl Into<String>, options: Vec<QuestionOption>) -> Self {
        let correct_answer = options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            question_type: QuestionType::MultipleChoice,
            text: text.into(),
            options: Some(options),
            correct_answer,
            explanation: String::new(),
        }
    }

    /// Draft for a question answered with free text.
    #[must_use]
    pub fn open(
        question_type: QuestionType,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_type,
            text: text.into(),
            options: None,
            correct_answer: correct_answer.into(),
            explanation: String::new(),
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Validate the draft and attach its identifier.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, a multiple choice
    /// question has no options, or option labels are blank or repeated.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let options = self.options.unwrap_or_default();
        if self.question_type == QuestionType::MultipleChoice && options.is_empty() {
            return Err(QuestionError::MissingOptions);
        }

        for (i, option) in options.iter().enumerate() {
            if option.label.trim().is_empty() {
                return Err(QuestionError::EmptyLabel);
            }
            if options[..i].iter().any(|o| o.label == option.label) {
                return Err(QuestionError::DuplicateLabel(option.label.clone()));
            }
        }

        Ok(Question {
            id,
            question_type: self.question_type,
            text: self.text,
            options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        })
    }
}

/// A validated question bound to its position in a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    question_type: QuestionType,
    text: String,
    options: Vec<QuestionOption>,
    correct_answer: String,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// True when the question is answered by picking options.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Maximum number of options that may be selected: the count of correct options.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    /// Labels of the correct options, in option order.
    #[must_use]
    pub fn correct_labels(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.label.clone())
            .collect()
    }

    #[must_use]
    pub fn option(&self, label: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
