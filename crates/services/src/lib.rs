#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_source;
pub mod sessions;

pub use trivia_core::Clock;
pub use sessions as session;

pub use error::{QuizSourceError, SessionError};
pub use quiz_source::{InMemoryQuizSource, JsonQuizSource, QuizListItem, QuizSource};

pub use sessions::{
    OptionRow, PaginationView, QuestionView, QuizLauncher, QuizSessionService, ResultRow,
    ResultView,
};
