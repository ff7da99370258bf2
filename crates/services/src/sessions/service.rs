use chrono::{DateTime, Utc};
use std::fmt;

use trivia_core::Clock;
use trivia_core::model::{AttemptSummary, Question, QuestionId, Quiz, QuizId};
use trivia_core::session::{EditOutcome, QuizResult, QuizSession, SessionProgress, SubmitOutcome};

use super::view::{PaginationView, QuestionView, ResultView};
use crate::error::SessionError;

const COUNTER_LABEL: &str = "Question";

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Owns one quiz attempt: the engine state, its clock and the summary of the
/// last submission.
///
/// Access is exclusive (`&mut self`); a UI holds one of these per open quiz.
pub struct QuizSessionService {
    quiz_id: QuizId,
    title: Option<String>,
    clock: Clock,
    session: QuizSession,
    started_at: DateTime<Utc>,
    summary: Option<AttemptSummary>,
    show_details: bool,
}

impl QuizSessionService {
    /// Open a quiz with its questions in quiz order.
    #[must_use]
    pub fn new(quiz: Quiz, clock: Clock) -> Self {
        let quiz_id = quiz.id();
        let title = quiz.title().map(str::to_owned);
        Self::with_questions(quiz_id, title, quiz.into_questions(), clock)
    }

    pub(crate) fn with_questions(
        quiz_id: QuizId,
        title: Option<String>,
        questions: Vec<Question>,
        clock: Clock,
    ) -> Self {
        log::debug!("opening quiz {quiz_id} with {} question(s)", questions.len());
        Self {
            quiz_id,
            title,
            clock,
            session: QuizSession::new(questions),
            started_at: clock.now(),
            summary: None,
            show_details: false,
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Summary of the submitted attempt, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&AttemptSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.session.result()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_completed()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.can_submit()
    }

    // ─── answers ──────────────────────────────────────────────────────────────

    /// Press an option on the displayed question.
    pub fn select(&mut self, label: &str) -> EditOutcome {
        let outcome = self.session.toggle_current(label);
        log::debug!(
            "select {label} on question {}: {outcome:?}",
            self.session.current_index() + 1
        );
        outcome
    }

    /// Type an answer for the displayed question.
    pub fn answer_text(&mut self, response: &str) -> EditOutcome {
        let Some(id) = self.session.current_question().map(Question::id) else {
            return EditOutcome::UnknownQuestion;
        };
        let outcome = self.session.set_text(id, response);
        log::debug!("text answer on question {id}: {outcome:?}");
        outcome
    }

    pub fn set_selection(&mut self, id: QuestionId, labels: Vec<String>) -> EditOutcome {
        self.session.set_selection(id, labels)
    }

    // ─── navigation ───────────────────────────────────────────────────────────

    pub fn next(&mut self) -> bool {
        self.session.next()
    }

    pub fn previous(&mut self) -> bool {
        self.session.previous()
    }

    /// Jump to a 1-based question number.
    pub fn go_to_number(&mut self, number: usize) -> bool {
        number
            .checked_sub(1)
            .is_some_and(|index| self.session.go_to(index))
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.session.go_to(index)
    }

    // ─── transitions ──────────────────────────────────────────────────────────

    pub fn toggle_reveal(&mut self) -> bool {
        let revealed = self.session.toggle_reveal();
        log::debug!("answers {}", if revealed { "shown" } else { "hidden" });
        revealed
    }

    /// Submit the attempt. On success the detailed results are shown and an
    /// [`AttemptSummary`] is stamped with the clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the clock went backwards since the
    /// attempt started. The session is left unsubmitted in that case.
    pub fn submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        let summary = if self.session.can_submit() {
            let completed_at = self.clock.now();
            let summary = AttemptSummary::from_result(
                self.quiz_id,
                self.started_at,
                completed_at,
                &self.session.score(),
            )?;
            Some(summary)
        } else {
            None
        };

        let outcome = self.session.submit();
        match &outcome {
            SubmitOutcome::Submitted(result) => {
                log::info!(
                    "quiz {} submitted: {}",
                    self.quiz_id,
                    result.score_line()
                );
                self.summary = summary;
                self.show_details = true;
            }
            SubmitOutcome::Incomplete { unanswered } => {
                log::warn!(
                    "submit rejected for quiz {}: {} unanswered",
                    self.quiz_id,
                    unanswered.len()
                );
            }
            SubmitOutcome::AlreadyCompleted => {
                log::debug!("quiz {} already submitted", self.quiz_id);
            }
        }
        Ok(outcome)
    }

    /// Start over: fresh answers, new start time, details hidden.
    pub fn reset(&mut self) {
        self.session.reset();
        self.summary = None;
        self.show_details = false;
        self.started_at = self.clock.now();
        log::info!("quiz {} reset", self.quiz_id);
    }

    /// Show or hide the per-question breakdown. Only meaningful once submitted.
    pub fn toggle_details(&mut self) -> bool {
        if self.session.is_completed() {
            self.show_details = !self.show_details;
        }
        self.show_details
    }

    // ─── views ────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView> {
        QuestionView::current(&self.session)
    }

    #[must_use]
    pub fn pagination_view(&self) -> PaginationView {
        PaginationView::from_session(&self.session, COUNTER_LABEL)
    }

    #[must_use]
    pub fn result_view(&self) -> Option<ResultView> {
        self.session
            .result()
            .map(|result| ResultView::from_result(result, self.show_details))
    }
}

impl fmt::Debug for QuizSessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSessionService")
            .field("quiz_id", &self.quiz_id)
            .field("session", &self.session)
            .field("started_at", &self.started_at)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
