use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;

use trivia_core::Clock;
use trivia_core::model::{Quiz, QuizId};

use super::service::QuizSessionService;
use crate::error::SessionError;
use crate::quiz_source::QuizSource;

/// Opens quiz sessions from a source.
#[derive(Clone)]
pub struct QuizLauncher {
    clock: Clock,
    source: Arc<dyn QuizSource + Send + Sync>,
    shuffle_questions: bool,
}

impl QuizLauncher {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuizSource + Send + Sync>) -> Self {
        Self {
            clock,
            source,
            shuffle_questions: false,
        }
    }

    /// Present questions in random order. Question ids keep their quiz order,
    /// so answers and results still refer to the original numbering.
    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle_questions: bool) -> Self {
        self.shuffle_questions = shuffle_questions;
        self
    }

    /// Start a session for the given quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` when the quiz cannot be loaded.
    pub fn start_session(&self, quiz_id: QuizId) -> Result<QuizSessionService, SessionError> {
        let quiz = self.source.load(quiz_id)?;
        Ok(self.open(quiz))
    }

    /// Start a session for the first quiz the source offers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` when the source is empty.
    pub fn start_first(&self) -> Result<QuizSessionService, SessionError> {
        let quiz = self.source.first()?;
        Ok(self.open(quiz))
    }

    fn open(&self, quiz: Quiz) -> QuizSessionService {
        if !self.shuffle_questions {
            return QuizSessionService::new(quiz, self.clock);
        }

        let quiz_id = quiz.id();
        let title = quiz.title().map(str::to_owned);
        let mut questions = quiz.into_questions();
        questions.shuffle(&mut rng());
        log::debug!("shuffled {} question(s) for quiz {quiz_id}", questions.len());
        QuizSessionService::with_questions(quiz_id, title, questions, self.clock)
    }
}
