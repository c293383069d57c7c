//! API request/response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use vocab_core::{
    AnswerMode, Book, Chapter, Direction, Orientation, PracticeSettings, Progress, Question,
    QuizProgress, QuizResult, QuizSettings, QuizSummary, Selection, UpdateOutcome, Word,
};

// === Catalog ===

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct ChapterListResponse {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Serialize)]
pub struct WordListResponse {
    pub words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
pub struct WordsByChaptersRequest {
    pub chapter_ids: Vec<String>,
}

// === Memorize ===

#[derive(Debug, Deserialize)]
pub struct CreateMemorizeRequest {
    #[serde(default)]
    pub selection: Selection,
    /// Overrides the server defaults when present.
    pub settings: Option<PracticeSettings>,
}

/// Current state of a memorize session.
#[derive(Debug, Serialize)]
pub struct MemorizeSnapshot {
    pub id: Uuid,
    pub progress: Progress,
    pub current_word: Option<Word>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub handled: bool,
    pub snapshot: MemorizeSnapshot,
}

#[derive(Debug, Serialize)]
pub struct UpdateWordResponse {
    pub outcome: UpdateOutcome,
    pub snapshot: MemorizeSnapshot,
}

// === Quiz ===

#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub settings: QuizSettings,
}

/// A question as shown to the learner, without its answer.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub orientation: Orientation,
    pub answer_mode: AnswerMode,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            orientation: question.orientation,
            answer_mode: question.answer_mode,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizSnapshot {
    pub id: Uuid,
    pub progress: QuizProgress,
    pub current_question: Option<QuestionView>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub result: QuizResult,
    pub snapshot: QuizSnapshot,
}
