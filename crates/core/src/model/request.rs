use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    #[error("Topic is required")]
    EmptyTopic,

    #[error("Please select a valid category")]
    UnknownCategory(String),

    #[error("Minimum 1 question required")]
    TooFewQuestions,

    #[error("Maximum 20 questions allowed")]
    TooManyQuestions,

    #[error("Invalid difficulty level")]
    InvalidDifficulty,
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Topic area offered when asking for a new trivia game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Science,
    History,
    Geography,
    Entertainment,
    Sports,
    Literature,
    Technology,
    Arts,
    Food,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::General,
        Category::Science,
        Category::History,
        Category::Geography,
        Category::Entertainment,
        Category::Sports,
        Category::Literature,
        Category::Technology,
        Category::Arts,
        Category::Food,
    ];

    /// Stable identifier used on the wire and on the command line.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Science => "science",
            Category::History => "history",
            Category::Geography => "geography",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Literature => "literature",
            Category::Technology => "technology",
            Category::Arts => "arts",
            Category::Food => "food",
        }
    }

    /// Human readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General Knowledge",
            Category::Science => "Science",
            Category::History => "History",
            Category::Geography => "Geography",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Literature => "Literature",
            Category::Technology => "Technology",
            Category::Arts => "Arts & Culture",
            Category::Food => "Food & Drink",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| RequestError::UnknownCategory(needle.to_string()))
    }
}

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// Parameters for generating a new trivia game.
///
/// Only validated locally; nothing in this workspace sends it anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriviaRequest {
    topic: String,
    category: Category,
    questions: u32,
    difficulty: u32,
}

impl TriviaRequest {
    pub const MIN_QUESTIONS: u32 = 1;
    pub const MAX_QUESTIONS: u32 = 20;
    pub const DEFAULT_QUESTIONS: u32 = 5;
    pub const MAX_DIFFICULTY: u32 = 100;
    pub const DEFAULT_DIFFICULTY: u32 = 50;

    /// Creates a validated request. The topic is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` when the topic is blank, the question count is
    /// outside 1..=20 or the difficulty is above 100.
    pub fn new(
        topic: impl Into<String>,
        category: Category,
        questions: u32,
        difficulty: u32,
    ) -> Result<Self, RequestError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        if questions < Self::MIN_QUESTIONS {
            return Err(RequestError::TooFewQuestions);
        }
        if questions > Self::MAX_QUESTIONS {
            return Err(RequestError::TooManyQuestions);
        }
        if difficulty > Self::MAX_DIFFICULTY {
            return Err(RequestError::InvalidDifficulty);
        }

        Ok(Self {
            topic,
            category,
            questions,
            difficulty,
        })
    }

    /// Request with default category, question count and difficulty.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::EmptyTopic` when the topic is blank.
    pub fn for_topic(topic: impl Into<String>) -> Result<Self, RequestError> {
        Self::new(
            topic,
            Category::default(),
            Self::DEFAULT_QUESTIONS,
            Self::DEFAULT_DIFFICULTY,
        )
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn questions(&self) -> u32 {
        self.questions
    }

    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_form() {
        let req = TriviaRequest::for_topic("  Jazz ").unwrap();
        assert_eq!(req.topic(), "Jazz");
        assert_eq!(req.category(), Category::General);
        assert_eq!(req.questions(), 5);
        assert_eq!(req.difficulty(), 50);
    }

    #[test]
    fn question_count_is_bounded() {
        let low = TriviaRequest::new("x", Category::Science, 0, 10).unwrap_err();
        let high = TriviaRequest::new("x", Category::Science, 21, 10).unwrap_err();
        assert_eq!(low, RequestError::TooFewQuestions);
        assert_eq!(high, RequestError::TooManyQuestions);
        assert!(TriviaRequest::new("x", Category::Science, 20, 100).is_ok());
    }

    #[test]
    fn blank_topic_is_rejected_with_form_message() {
        let err = TriviaRequest::for_topic("   ").unwrap_err();
        assert_eq!(err.to_string(), "Topic is required");
    }

    #[test]
    fn difficulty_above_hundred_is_rejected() {
        let err = TriviaRequest::new("x", Category::Arts, 3, 101).unwrap_err();
        assert_eq!(err, RequestError::InvalidDifficulty);
    }

    #[test]
    fn category_parses_ids_case_insensitively() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(Category::Arts.to_string(), "Arts & Culture");
        assert!(matches!(
            "cooking".parse::<Category>(),
            Err(RequestError::UnknownCategory(_))
        ));
    }

    #[test]
    fn serializes_with_snake_case_category() {
        let req = TriviaRequest::new("Planets", Category::Science, 8, 70).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["category"], "science");
        assert_eq!(json["questions"], 8);
    }
}
