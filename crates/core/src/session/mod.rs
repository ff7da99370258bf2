//! Quiz session engine: answer tracking, scoring, navigation and the
//! answering/revealed/completed lifecycle.

mod cursor;
mod reveal;
mod scorer;
mod state;
mod tracker;

pub use cursor::Cursor;
pub use reveal::{OptionStatus, selection_hint};
pub use scorer::{QuestionResult, QuizResult, score};
pub use state::{EditOutcome, QuizSession, SessionProgress, SessionState, SubmitOutcome};
pub use tracker::{Answer, AnswerTracker, Toggle, apply_toggle};
