use std::fmt;

use crate::model::{Question, QuestionId};
use crate::session::cursor::Cursor;
use crate::session::scorer::{QuizResult, score};
use crate::session::tracker::{Answer, AnswerTracker, Toggle};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session is in its lifecycle.
///
/// `Completed` carries the result, so a result exists exactly when the quiz
/// has been submitted. Reveal stays toggleable after completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Answering,
    Revealed,
    Completed { result: QuizResult, revealed: bool },
}

impl SessionState {
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        match self {
            SessionState::Answering => false,
            SessionState::Revealed => true,
            SessionState::Completed { revealed, .. } => *revealed,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionState::Completed { .. })
    }

    /// Answers can only change while answering with solutions hidden.
    #[must_use]
    pub fn accepts_edits(&self) -> bool {
        matches!(self, SessionState::Answering)
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of trying to change an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// An option press went through the selection policy.
    Toggled(Toggle),
    /// A full selection or text answer was stored.
    Stored,
    /// Answers are revealed or the quiz is submitted.
    Frozen,
    UnknownQuestion,
    /// Text given for an option question, or labels for a text question.
    WrongKind,
}

impl EditOutcome {
    /// Whether the answer map changed shape or content.
    #[must_use]
    pub fn applied(self) -> bool {
        match self {
            EditOutcome::Toggled(toggle) => toggle.applied(),
            EditOutcome::Stored => true,
            EditOutcome::Frozen | EditOutcome::UnknownQuestion | EditOutcome::WrongKind => false,
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(QuizResult),
    /// Some questions have no answer yet; nothing changed.
    Incomplete { unanswered: Vec<QuestionId> },
    AlreadyCompleted,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub current: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a fixed list of questions.
///
/// Invalid operations never fail; they leave the session untouched and say
/// so through their return value. Question ids must be unique within the list,
/// which `Quiz` guarantees by numbering questions in order.
#[derive(Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    cursor: Cursor,
    answers: AnswerTracker,
    state: SessionState,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let cursor = Cursor::new(questions.len());
        Self {
            questions,
            cursor,
            answers: AnswerTracker::new(),
            state: SessionState::Answering,
        }
    }

    // ─── read accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor.index())
    }

    /// Labels picked for the displayed question.
    #[must_use]
    pub fn current_selection(&self) -> &[String] {
        self.current_question()
            .map_or(&[][..], |q| self.answers.selection(q.id()))
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerTracker {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, id: QuestionId) -> Option<&Answer> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.state.accepts_edits()
    }

    /// Submitted result, present only once the quiz is completed.
    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        match &self.state {
            SessionState::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Questions that still have no answer, in quiz order.
    #[must_use]
    pub fn unanswered(&self) -> Vec<QuestionId> {
        self.questions
            .iter()
            .map(Question::id)
            .filter(|id| !self.answers.is_answered(*id))
            .collect()
    }

    #[must_use]
    pub fn is_all_answered(&self) -> bool {
        self.questions
            .iter()
            .all(|q| self.answers.is_answered(q.id()))
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_completed() && self.is_all_answered()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = total - self.unanswered().len();
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            current: self.cursor.index(),
            is_complete: self.is_completed(),
        }
    }

    /// Score the current answers without submitting.
    #[must_use]
    pub fn score(&self) -> QuizResult {
        score(&self.questions, &self.answers)
    }

    // ─── answers ──────────────────────────────────────────────────────────────

    /// Press an option on the given question.
    pub fn toggle_option(&mut self, id: QuestionId, label: &str) -> EditOutcome {
        if !self.can_edit() {
            return EditOutcome::Frozen;
        }
        let Some(question) = self.questions.iter().find(|q| q.id() == id) else {
            return EditOutcome::UnknownQuestion;
        };
        if !question.has_options() {
            return EditOutcome::WrongKind;
        }
        EditOutcome::Toggled(self.answers.toggle_option(question, label))
    }

    /// Press an option on the displayed question.
    pub fn toggle_current(&mut self, label: &str) -> EditOutcome {
        let Some(id) = self.current_question().map(Question::id) else {
            return EditOutcome::UnknownQuestion;
        };
        self.toggle_option(id, label)
    }

    /// Replace the whole selection of a question, bypassing the selection policy.
    pub fn set_selection(&mut self, id: QuestionId, labels: Vec<String>) -> EditOutcome {
        if !self.can_edit() {
            return EditOutcome::Frozen;
        }
        match self.question(id).map(Question::has_options) {
            None => EditOutcome::UnknownQuestion,
            Some(false) => EditOutcome::WrongKind,
            Some(true) => {
                self.answers.set_selection(id, labels);
                EditOutcome::Stored
            }
        }
    }

    /// Store a typed answer for a question without options.
    pub fn set_text(&mut self, id: QuestionId, response: impl Into<String>) -> EditOutcome {
        if !self.can_edit() {
            return EditOutcome::Frozen;
        }
        match self.question(id).map(Question::has_options) {
            None => EditOutcome::UnknownQuestion,
            Some(true) => EditOutcome::WrongKind,
            Some(false) => {
                self.answers.set_text(id, response);
                EditOutcome::Stored
            }
        }
    }

    // ─── navigation ───────────────────────────────────────────────────────────

    pub fn next(&mut self) -> bool {
        self.cursor.next()
    }

    pub fn previous(&mut self) -> bool {
        self.cursor.previous()
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.cursor.go_to(index)
    }

    // ─── transitions ──────────────────────────────────────────────────────────

    /// Show or hide correct answers. Returns the new reveal flag.
    pub fn toggle_reveal(&mut self) -> bool {
        self.state = match std::mem::replace(&mut self.state, SessionState::Answering) {
            SessionState::Answering => SessionState::Revealed,
            SessionState::Revealed => SessionState::Answering,
            SessionState::Completed { result, revealed } => SessionState::Completed {
                result,
                revealed: !revealed,
            },
        };
        self.state.is_revealed()
    }

    /// Score and complete the quiz if every question has an answer.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_completed() {
            return SubmitOutcome::AlreadyCompleted;
        }
        let unanswered = self.unanswered();
        if !unanswered.is_empty() {
            return SubmitOutcome::Incomplete { unanswered };
        }

        let result = self.score();
        self.state = SessionState::Completed {
            result: result.clone(),
            revealed: self.state.is_revealed(),
        };
        SubmitOutcome::Submitted(result)
    }

    /// Back to a fresh attempt: no answers, hidden solutions, first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.cursor.reset();
        self.state = SessionState::Answering;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.cursor.index())
            .field("answered", &self.answers.answered_count())
            .field("revealed", &self.is_revealed())
            .field("completed", &self.is_completed())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
