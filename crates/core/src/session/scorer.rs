use serde::Serialize;

use crate::model::{Question, QuestionId};
use crate::session::tracker::AnswerTracker;

/// Outcome for one question of a scored quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub prompt: String,
    pub is_correct: bool,
    /// Picked labels, or the typed response for questions without options.
    pub selected: Vec<String>,
    /// Correct labels, or the expected response for questions without options.
    pub correct: Vec<String>,
}

/// Aggregate score of a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub total_questions: usize,
    pub total_correct: usize,
    /// Rounded half up; 0 for an empty quiz.
    pub score_percent: u8,
    pub breakdown: Vec<QuestionResult>,
}

impl QuizResult {
    /// `"{correct}/{total} ({percent}%)"`
    #[must_use]
    pub fn score_line(&self) -> String {
        format!(
            "{}/{} ({}%)",
            self.total_correct, self.total_questions, self.score_percent
        )
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.total_correct == self.total_questions
    }
}

/// Score every question against the recorded answers.
///
/// Pure: neither input is modified and equal inputs give equal results.
#[must_use]
pub fn score(questions: &[Question], answers: &AnswerTracker) -> QuizResult {
    let breakdown: Vec<QuestionResult> = questions
        .iter()
        .map(|question| score_question(question, answers))
        .collect();

    let total_questions = breakdown.len();
    let total_correct = breakdown.iter().filter(|r| r.is_correct).count();

    QuizResult {
        total_questions,
        total_correct,
        score_percent: percent(total_correct, total_questions),
        breakdown,
    }
}

fn score_question(question: &Question, answers: &AnswerTracker) -> QuestionResult {
    let (is_correct, selected, correct) = if question.has_options() {
        let correct = question.correct_labels();
        let selected = answers.selection(question.id()).to_vec();
        (same_labels(&selected, &correct), selected, correct)
    } else {
        let response = answers.text(question.id()).unwrap_or_default();
        let expected = question.correct_answer();
        let is_correct = !response.trim().is_empty() && text_matches(response, expected);
        let selected = if response.is_empty() {
            Vec::new()
        } else {
            vec![response.to_string()]
        };
        (is_correct, selected, vec![expected.to_string()])
    };

    QuestionResult {
        question_id: question.id(),
        prompt: question.text().to_string(),
        is_correct,
        selected,
        correct,
    }
}

/// Set equality: same size and every selected label is a correct one.
fn same_labels(selected: &[String], correct: &[String]) -> bool {
    selected.len() == correct.len() && selected.iter().all(|label| correct.contains(label))
}

/// Trimmed, case-insensitive comparison.
fn text_matches(response: &str, expected: &str) -> bool {
    response.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// `round(correct / total * 100)`, half up, in integer arithmetic.
fn percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (correct.min(total) * 200 + total) / (total * 2);
    u8::try_from(scaled).unwrap_or(100)
}
