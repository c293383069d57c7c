//! Core types for the vocabulary practice engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown as the answer when a word somehow has no definitions.
pub const NO_DEFINITION: &str = "(no definition)";

/// One meaning of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub part_of_speech: String,
}

impl Definition {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            part_of_speech: String::new(),
        }
    }
}

/// A vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub word: String,
    pub definitions: Vec<Definition>,
    pub book: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<String>,
    #[serde(default)]
    pub memorized: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Word {
    /// Create an unmemorized word with a zero review count.
    pub fn new(
        id: impl Into<String>,
        word: impl Into<String>,
        book: impl Into<String>,
        definitions: Vec<Definition>,
    ) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            definitions,
            book: book.into(),
            chapter_id: None,
            memorized: false,
            count: 0,
            created_at: None,
        }
    }

    /// Text of the first definition, or the `NO_DEFINITION` sentinel.
    pub fn primary_definition(&self) -> &str {
        self.definitions
            .first()
            .map(|d| d.definition.as_str())
            .unwrap_or(NO_DEFINITION)
    }
}

/// Sub-grouping of words within a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub book_name: String,
}

/// Top-level grouping of words. The name is the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
}

/// Navigation direction for the flashcard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

/// Which side of the word/definition pair is the quiz prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    WordToDefinition,
    DefinitionToWord,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::WordToDefinition
    }
}

/// How quiz answers are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    MultipleChoice,
    TextInput,
}

impl Default for AnswerMode {
    fn default() -> Self {
        Self::MultipleChoice
    }
}

/// Flashcard session tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeSettings {
    /// Autoplay cadence in milliseconds.
    pub tick_interval_ms: u64,
    /// Beats spent on each word before autoplay advances.
    pub beats_per_word: u32,
    /// Beats on which autoplay pronounces the current word.
    pub pronounce_beats: Vec<u32>,
    pub word_locale: String,
    pub definition_locale: String,
    pub pronunciation_enabled: bool,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            beats_per_word: 20,
            pronounce_beats: vec![1, 5],
            word_locale: "en-US".to_string(),
            definition_locale: "ko-KR".to_string(),
            pronunciation_enabled: true,
        }
    }
}

/// Quiz configuration chosen before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub total_questions: usize,
    /// Seconds per question. Zero disables the countdown.
    pub time_limit_secs: u32,
    pub orientation: Orientation,
    pub answer_mode: AnswerMode,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_questions: 10,
            time_limit_secs: 30,
            orientation: Orientation::default(),
            answer_mode: AnswerMode::default(),
        }
    }
}

impl QuizSettings {
    /// Number of questions a selection of `word_count` words can supply.
    pub fn available_questions(&self, word_count: usize) -> usize {
        self.total_questions.min(word_count)
    }
}
