//! Vocabulary practice engine shared by the practice server and its clients.
//!
//! Provides:
//! - Flashcard memorize session (navigation, filter, shuffle, autoplay)
//! - Quiz generation with distractors, quiz play and scoring
//! - Book/chapter selection helpers
//! - Collaborator traits for word storage and speech output

pub mod autoplay;
pub mod catalog;
pub mod error;
pub mod flashcard;
pub mod keys;
pub mod matching;
pub mod quiz;
pub mod shuffle;
pub mod store;
pub mod types;
pub mod word_set;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{load_words, sort_chapters, Selection};
pub use error::{Result, StoreError};
pub use flashcard::{FlashcardSession, Progress, UpdateOutcome};
pub use keys::{command_for_key, KeyCommand};
pub use matching::compare_answers;
pub use quiz::{generate, Question, QuizPhase, QuizProgress, QuizResult, QuizRunner, QuizSummary};
pub use shuffle::shuffle;
pub use store::{Silent, Speaker, VocabularyStore};
pub use types::{
    AnswerMode, Book, Chapter, Definition, Direction, Orientation, PracticeSettings,
    QuizSettings, Word,
};
pub use word_set::WordSet;
