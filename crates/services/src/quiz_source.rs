use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use trivia_core::model::{Quiz, QuizDraft, QuizId};

use crate::error::QuizSourceError;

/// Presentation-agnostic listing entry for an available quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizListItem {
    pub id: QuizId,
    pub title: Option<String>,
    pub question_count: usize,
}

impl QuizListItem {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id(),
            title: quiz.title().map(str::to_owned),
            question_count: quiz.len(),
        }
    }
}

/// Supplies quizzes to sessions. Where they come from (a file, a generator,
/// a fixture) is up to the implementation.
pub trait QuizSource {
    /// Load a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceError::NotFound` for unknown ids.
    fn load(&self, id: QuizId) -> Result<Quiz, QuizSourceError>;

    /// All available quizzes, in source order.
    fn list(&self) -> Vec<QuizListItem>;

    /// The first available quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceError::Empty` when the source holds nothing.
    fn first(&self) -> Result<Quiz, QuizSourceError> {
        let item = self.list().into_iter().next().ok_or(QuizSourceError::Empty)?;
        self.load(item.id)
    }
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Thread-safe in-memory quiz store, mainly for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuizSource {
    inner: Arc<Mutex<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    order: Vec<QuizId>,
    quizzes: HashMap<QuizId, Quiz>,
}

impl InMemoryQuizSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quizzes(quizzes: impl IntoIterator<Item = Quiz>) -> Self {
        let source = Self::new();
        for quiz in quizzes {
            source.insert(quiz);
        }
        source
    }

    /// Insert or replace a quiz. Replacing keeps its original position.
    pub fn insert(&self, quiz: Quiz) {
        let mut store = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = quiz.id();
        if store.quizzes.insert(id, quiz).is_none() {
            store.order.push(id);
        }
    }
}

impl QuizSource for InMemoryQuizSource {
    fn load(&self, id: QuizId) -> Result<Quiz, QuizSourceError> {
        let store = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        store
            .quizzes
            .get(&id)
            .cloned()
            .ok_or(QuizSourceError::NotFound(id))
    }

    fn list(&self) -> Vec<QuizListItem> {
        let store = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        store
            .order
            .iter()
            .filter_map(|id| store.quizzes.get(id))
            .map(QuizListItem::from_quiz)
            .collect()
    }
}

//
// ─── JSON ──────────────────────────────────────────────────────────────────────
//

/// A quiz file holds either one quiz or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuizFile {
    Many(Vec<QuizDraft>),
    One(QuizDraft),
}

/// Quizzes parsed from generator JSON.
#[derive(Debug, Clone)]
pub struct JsonQuizSource {
    origin: Option<PathBuf>,
    quizzes: InMemoryQuizSource,
}

impl JsonQuizSource {
    /// Parse quizzes from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceError::Json` for malformed input and
    /// `QuizSourceError::Quiz` when a question fails validation and
    /// `QuizSourceError::DuplicateId` when two quizzes share an id.
    pub fn from_json(json: &str) -> Result<Self, QuizSourceError> {
        let drafts = match serde_json::from_str::<QuizFile>(json)? {
            QuizFile::Many(drafts) => drafts,
            QuizFile::One(draft) => vec![draft],
        };
        let quizzes = drafts
            .into_iter()
            .map(QuizDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(quizzes.len());
        if let Some(dup) = quizzes.iter().map(Quiz::id).find(|id| !seen.insert(*id)) {
            log::warn!("quiz file repeats id {dup}");
            return Err(QuizSourceError::DuplicateId(dup));
        }

        log::debug!("parsed {} quiz(zes) from JSON", quizzes.len());
        Ok(Self {
            origin: None,
            quizzes: InMemoryQuizSource::with_quizzes(quizzes),
        })
    }

    /// Read and parse a quiz file.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceError::Io` when the file cannot be read, otherwise
    /// the same errors as [`JsonQuizSource::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuizSourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| QuizSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut source = Self::from_json(&json)?;
        log::info!("loaded quizzes from {}", path.display());
        source.origin = Some(path.to_path_buf());
        Ok(source)
    }

    /// File the quizzes were read from, if any.
    #[must_use]
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

impl QuizSource for JsonQuizSource {
    fn load(&self, id: QuizId) -> Result<Quiz, QuizSourceError> {
        self.quizzes.load(id)
    }

    fn list(&self) -> Vec<QuizListItem> {
        self.quizzes.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{QuestionDraft, QuestionType};

    const ONE: &str = r#"{
        "quizId": "0b7f5a52-3a55-4f8e-9c7e-5a1f2e0c9d11",
        "content": [
            {"question_type": "true_false", "question": "Water boils at 100C at sea level?", "correct_answer": "True"}
        ]
    }"#;

    #[test]
    fn single_object_is_one_quiz() {
        let source = JsonQuizSource::from_json(ONE).unwrap();
        let items = source.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question_count, 1);
        assert!(source.origin().is_none());
    }

    #[test]
    fn array_keeps_file_order() {
        let json = r#"[
            {"title": "first", "content": []},
            {"title": "second", "content": []}
        ]"#;
        let source = JsonQuizSource::from_json(json).unwrap();
        let titles: Vec<_> = source.list().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec![Some("first".into()), Some("second".into())]);
        assert_eq!(source.first().unwrap().title(), Some("first"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = JsonQuizSource::from_json("{ nope").unwrap_err();
        assert!(matches!(err, QuizSourceError::Json(_)));
    }

    #[test]
    fn invalid_question_is_reported() {
        let json = r#"{"content": [{"question_type": "multiple_choice", "question": "Pick"}]}"#;
        let err = JsonQuizSource::from_json(json).unwrap_err();
        assert!(matches!(err, QuizSourceError::Quiz(_)));
    }

    #[test]
    fn repeated_quiz_id_is_rejected() {
        let json = r#"[
            {"quizId": "0b7f5a52-3a55-4f8e-9c7e-5a1f2e0c9d11", "title": "first", "content": []},
            {"quizId": "0b7f5a52-3a55-4f8e-9c7e-5a1f2e0c9d11", "title": "second", "content": []}
        ]"#;
        let err = JsonQuizSource::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            QuizSourceError::DuplicateId(id) if id.to_string() == "0b7f5a52-3a55-4f8e-9c7e-5a1f2e0c9d11"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonQuizSource::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, QuizSourceError::Io { .. }));
    }

    #[test]
    fn in_memory_load_and_not_found() {
        let quiz = Quiz::new(
            QuizId::generate(),
            Some("Facts".into()),
            vec![QuestionDraft::open(QuestionType::TrueFalse, "Sky is blue?", "true")],
        )
        .unwrap();
        let id = quiz.id();
        let source = InMemoryQuizSource::with_quizzes([quiz]);

        assert_eq!(source.load(id).unwrap().title(), Some("Facts"));
        let missing = QuizId::generate();
        assert!(matches!(
            source.load(missing),
            Err(QuizSourceError::NotFound(m)) if m == missing
        ));
    }

    #[test]
    fn empty_source_has_no_first() {
        let source = InMemoryQuizSource::new();
        assert!(matches!(source.first(), Err(QuizSourceError::Empty)));
    }
}
