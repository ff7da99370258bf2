use crate::model::QuestionOption;

/// How an option should be presented given the selection and reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStatus {
    /// Answers hidden, option picked.
    Selected,
    /// Answers hidden, option not picked.
    Unselected,
    /// Revealed: picked and correct.
    SelectedCorrect,
    /// Revealed: picked but wrong.
    SelectedWrong,
    /// Revealed: correct but not picked.
    MissedCorrect,
    /// Revealed: neither picked nor correct.
    Neutral,
}

impl OptionStatus {
    #[must_use]
    pub fn classify(option: &QuestionOption, selected: &[String], revealed: bool) -> Self {
        let picked = selected.iter().any(|l| *l == option.label);
        match (revealed, picked, option.is_correct) {
            (false, true, _) => OptionStatus::Selected,
            (false, false, _) => OptionStatus::Unselected,
            (true, true, true) => OptionStatus::SelectedCorrect,
            (true, true, false) => OptionStatus::SelectedWrong,
            (true, false, true) => OptionStatus::MissedCorrect,
            (true, false, false) => OptionStatus::Neutral,
        }
    }

    /// Picked by the user, whether or not answers are revealed. Views pair
    /// it with [`OptionStatus::is_revealed`] for the "YOU" badge.
    #[must_use]
    pub fn is_pick(self) -> bool {
        matches!(
            self,
            OptionStatus::Selected | OptionStatus::SelectedCorrect | OptionStatus::SelectedWrong
        )
    }

    #[must_use]
    pub fn is_revealed(self) -> bool {
        !matches!(self, OptionStatus::Selected | OptionStatus::Unselected)
    }
}

/// Instruction shown above the options, e.g. "Select 2 correct answers".
#[must_use]
pub fn selection_hint(cap: usize) -> String {
    let noun = if cap == 1 { "answer" } else { "answers" };
    format!("Select {cap} correct {noun}")
}
