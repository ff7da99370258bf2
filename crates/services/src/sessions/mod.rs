mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use service::QuizSessionService;
pub use view::{OptionRow, PaginationView, QuestionView, ResultRow, ResultView};
pub use workflow::QuizLauncher;
