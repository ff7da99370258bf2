mod attempt;
mod ids;
mod question;
mod quiz;
mod request;

pub use ids::{ParseIdError, QuestionId, QuizId};

pub use attempt::{AttemptSummary, AttemptSummaryError};
pub use question::{Question, QuestionDraft, QuestionError, QuestionOption, QuestionType};
pub use quiz::{Quiz, QuizDraft, QuizError};
pub use request::{Category, RequestError, TriviaRequest};
