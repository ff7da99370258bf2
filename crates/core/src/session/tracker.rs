use std::collections::BTreeMap;

use crate::model::{Question, QuestionId};

/// What the user has answered for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Selected option labels, in the order they were picked.
    Choices(Vec<String>),
    /// Free text for questions without options.
    Text(String),
}

impl Answer {
    /// Selected labels; empty for text answers.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        match self {
            Answer::Choices(labels) => labels,
            Answer::Text(_) => &[],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Choices(labels) => labels.is_empty(),
            Answer::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Result of pressing an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Single-answer question: the selection is now exactly the pressed option.
    Replaced,
    Added,
    Removed,
    /// The selection already holds as many options as there are correct ones.
    AtCapacity,
    /// The label is not one of the question's options.
    UnknownOption,
}

impl Toggle {
    /// Whether the press produced a new selection.
    #[must_use]
    pub fn applied(self) -> bool {
        matches!(self, Toggle::Replaced | Toggle::Added | Toggle::Removed)
    }
}

/// Computes the selection that results from pressing `label`.
///
/// With `cap == 1` the press replaces the selection. Otherwise it toggles
/// membership, adding only while the selection is below `cap`.
#[must_use]
pub fn apply_toggle(current: &[String], label: &str, cap: usize) -> (Vec<String>, Toggle) {
    if cap == 1 {
        return (vec![label.to_string()], Toggle::Replaced);
    }

    if current.iter().any(|l| l == label) {
        let next = current.iter().filter(|l| *l != label).cloned().collect();
        return (next, Toggle::Removed);
    }

    if current.len() < cap {
        let mut next = current.to_vec();
        next.push(label.to_string());
        return (next, Toggle::Added);
    }

    (current.to_vec(), Toggle::AtCapacity)
}

/// Answers keyed by question id.
///
/// A plain store: it does not know whether the session is frozen. The
/// session decides when edits are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerTracker {
    answers: BTreeMap<QuestionId, Answer>,
}

impl AnswerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full selection for a question. Repeated labels keep their
    /// first position.
    pub fn set_selection(&mut self, question_id: QuestionId, labels: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        self.answers.insert(question_id, Answer::Choices(unique));
    }

    pub fn set_text(&mut self, question_id: QuestionId, response: impl Into<String>) {
        self.answers
            .insert(question_id, Answer::Text(response.into()));
    }

    /// Apply the selection policy for a press on `label`.
    pub fn toggle_option(&mut self, question: &Question, label: &str) -> Toggle {
        if question.option(label).is_none() {
            return Toggle::UnknownOption;
        }

        let (next, outcome) = apply_toggle(self.selection(question.id()), label, question.cap());
        if outcome.applied() {
            self.answers.insert(question.id(), Answer::Choices(next));
        }
        outcome
    }

    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    /// Selected labels for a question, empty when nothing was picked.
    #[must_use]
    pub fn selection(&self, question_id: QuestionId) -> &[String] {
        self.answers.get(&question_id).map_or(&[][..], Answer::labels)
    }

    /// Text answer for a question, if one was given.
    #[must_use]
    pub fn text(&self, question_id: QuestionId) -> Option<&str> {
        match self.answers.get(&question_id) {
            Some(Answer::Text(text)) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_answered(&self, question_id: QuestionId) -> bool {
        self.answers
            .get(&question_id)
            .is_some_and(|answer| !answer.is_empty())
    }

    /// Number of questions with a non-empty answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| !a.is_empty()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionOption};

    fn question(correct: &[&str]) -> Question {
        let options = ["A", "B", "C", "D"]
            .iter()
            .map(|l| QuestionOption::new(*l, l.to_lowercase(), correct.contains(l)))
            .collect();
        QuestionDraft::multiple_choice("Pick", options)
            .validate(QuestionId::new(0))
            .unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn single_answer_press_replaces_selection() {
        let q = question(&["B"]);
        let mut tracker = AnswerTracker::new();

        assert_eq!(tracker.toggle_option(&q, "A"), Toggle::Replaced);
        assert_eq!(tracker.toggle_option(&q, "B"), Toggle::Replaced);

        assert_eq!(tracker.selection(q.id()), labels(&["B"]).as_slice());
    }

    #[test]
    fn single_answer_press_on_selected_keeps_it() {
        let q = question(&["A"]);
        let mut tracker = AnswerTracker::new();
        tracker.toggle_option(&q, "A");
        tracker.toggle_option(&q, "A");
        assert_eq!(tracker.selection(q.id()), labels(&["A"]).as_slice());
    }

    #[test]
    fn multi_answer_selection_is_capped() {
        let q = question(&["A", "C"]);
        let mut tracker = AnswerTracker::new();

        assert_eq!(tracker.toggle_option(&q, "A"), Toggle::Added);
        assert_eq!(tracker.toggle_option(&q, "B"), Toggle::Added);
        assert_eq!(tracker.toggle_option(&q, "D"), Toggle::AtCapacity);
        assert_eq!(tracker.toggle_option(&q, "C"), Toggle::AtCapacity);

        assert_eq!(tracker.selection(q.id()), labels(&["A", "B"]).as_slice());
    }

    #[test]
    fn multi_answer_press_toggles_off() {
        let q = question(&["A", "C", "D"]);
        let mut tracker = AnswerTracker::new();
        tracker.toggle_option(&q, "A");
        tracker.toggle_option(&q, "C");

        assert_eq!(tracker.toggle_option(&q, "A"), Toggle::Removed);
        assert_eq!(tracker.toggle_option(&q, "B"), Toggle::Added);

        assert_eq!(tracker.selection(q.id()), labels(&["C", "B"]).as_slice());
    }

    #[test]
    fn cap_zero_never_selects() {
        let q = question(&[]);
        let mut tracker = AnswerTracker::new();

        for label in ["A", "B", "C", "D"] {
            assert_eq!(tracker.toggle_option(&q, label), Toggle::AtCapacity);
        }

        assert!(tracker.selection(q.id()).is_empty());
        assert!(!tracker.is_answered(q.id()));
    }

    #[test]
    fn unknown_label_is_ignored() {
        let q = question(&["A"]);
        let mut tracker = AnswerTracker::new();
        assert_eq!(tracker.toggle_option(&q, "Z"), Toggle::UnknownOption);
        assert!(tracker.is_empty());
    }

    #[test]
    fn set_selection_replaces_and_dedups() {
        let id = QuestionId::new(4);
        let mut tracker = AnswerTracker::new();
        tracker.set_selection(id, labels(&["A"]));
        tracker.set_selection(id, labels(&["C", "B", "C"]));
        assert_eq!(tracker.selection(id), labels(&["C", "B"]).as_slice());
    }

    #[test]
    fn blank_text_does_not_count_as_answered() {
        let id = QuestionId::new(1);
        let mut tracker = AnswerTracker::new();
        tracker.set_text(id, "   ");
        assert!(!tracker.is_answered(id));
        tracker.set_text(id, "Paris");
        assert!(tracker.is_answered(id));
        assert_eq!(tracker.text(id), Some("Paris"));
        assert_eq!(tracker.answered_count(), 1);
    }

    #[test]
    fn clear_empties_the_map() {
        let mut tracker = AnswerTracker::new();
        tracker.set_selection(QuestionId::new(0), labels(&["A"]));
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
