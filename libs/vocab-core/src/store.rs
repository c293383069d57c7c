//! Collaborator interfaces consumed by the engine.

use crate::error::Result;
use crate::types::{Book, Chapter, Word};

/// Data access for books, chapters and words.
pub trait VocabularyStore: Send + Sync {
    fn list_books(&self) -> Result<Vec<Book>>;

    /// Chapters of `book_name`, ordered by the number in their name.
    fn list_chapters(&self, book_name: &str) -> Result<Vec<Chapter>>;

    /// Words in any of `chapter_ids`. Implementations return an empty list for
    /// empty input without touching the backend.
    fn list_words_by_chapters(&self, chapter_ids: &[String]) -> Result<Vec<Word>>;

    fn list_words_by_book(&self, book_name: &str) -> Result<Vec<Word>>;

    fn update_word(&self, word: &Word) -> Result<()>;
}

/// Text-to-speech output. Fire-and-forget.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str, locale: &str);
}

/// Speaker that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Speaker for Silent {
    fn speak(&self, _text: &str, _locale: &str) {}
}
