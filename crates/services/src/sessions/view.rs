use trivia_core::model::{QuestionId, QuestionType};
use trivia_core::session::{OptionStatus, QuizResult, QuizSession, selection_hint};

/// Maximum prompt length shown in the detailed results list.
const PREVIEW_CHARS: usize = 30;

/// Presentation-agnostic row for one option of the displayed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub label: String,
    pub text: String,
    pub status: OptionStatus,
    /// Marks the user's own picks once answers are revealed.
    pub is_own_pick: bool,
}

/// Everything needed to render the displayed question.
///
/// Not a UI view-model: no styling, no localization beyond the hint text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    /// 1-based position.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub question_type: QuestionType,
    /// Present for option questions.
    pub hint: Option<String>,
    pub options: Vec<OptionRow>,
    /// Typed response for questions without options.
    pub response: Option<String>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub editable: bool,
}

impl QuestionView {
    /// View of the question under the cursor; `None` for an empty quiz.
    #[must_use]
    pub fn current(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let revealed = session.is_revealed();
        let selected = session.answers().selection(question.id());

        let options = question
            .options()
            .iter()
            .map(|option| {
                let status = OptionStatus::classify(option, selected, revealed);
                OptionRow {
                    label: option.label.clone(),
                    text: option.text.clone(),
                    status,
                    is_own_pick: status.is_revealed() && status.is_pick(),
                }
            })
            .collect();

        Some(Self {
            id: question.id(),
            number: session.current_index() + 1,
            total: session.questions().len(),
            prompt: question.text().to_owned(),
            question_type: question.question_type(),
            hint: question.has_options().then(|| selection_hint(question.cap())),
            options,
            response: session.answers().text(question.id()).map(str::to_owned),
            correct_answer: revealed.then(|| question.correct_answer().to_owned()),
            explanation: revealed.then(|| question.explanation().to_owned()),
            editable: session.can_edit(),
        })
    }
}

/// Pager state; hidden entirely for quizzes with a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// 1-based position.
    pub current: usize,
    pub total: usize,
    pub counter: String,
    pub is_first: bool,
    pub is_last: bool,
    pub visible: bool,
}

impl PaginationView {
    #[must_use]
    pub fn from_session(session: &QuizSession, counter_label: &str) -> Self {
        let cursor = session.cursor();
        Self {
            current: cursor.index() + 1,
            total: cursor.len(),
            counter: format!("{counter_label} {}", cursor.index() + 1),
            is_first: !cursor.has_previous(),
            is_last: !cursor.has_next(),
            visible: cursor.is_navigable(),
        }
    }
}

/// One line of the detailed results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub number: usize,
    pub prompt_preview: String,
    pub is_correct: bool,
}

/// Score banner plus the optional per-question breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub score_line: String,
    pub is_perfect: bool,
    /// Empty unless details are shown.
    pub rows: Vec<ResultRow>,
    pub details_visible: bool,
}

impl ResultView {
    #[must_use]
    pub fn from_result(result: &QuizResult, show_details: bool) -> Self {
        let rows = if show_details {
            result
                .breakdown
                .iter()
                .enumerate()
                .map(|(i, r)| ResultRow {
                    number: i + 1,
                    prompt_preview: preview(&r.prompt),
                    is_correct: r.is_correct,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            score_line: result.score_line(),
            is_perfect: result.is_perfect(),
            rows,
            details_visible: show_details,
        }
    }
}

fn preview(prompt: &str) -> String {
    let head: String = prompt.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
