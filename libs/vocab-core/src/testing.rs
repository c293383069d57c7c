//! In-crate test doubles.

use std::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::store::{Speaker, VocabularyStore};
use crate::types::{Book, Chapter, Definition, Word};

/// Two chapters of the "Basics" book, two words each.
pub fn sample_words() -> Vec<Word> {
    let entries = [
        ("w1", "run", "달리다", "ch1"),
        ("w2", "jump", "뛰다", "ch1"),
        ("w3", "eat", "먹다", "ch2"),
        ("w4", "sleep", "자다", "ch2"),
    ];
    entries
        .iter()
        .map(|(id, word, def, chapter)| {
            let mut w = Word::new(*id, *word, "Basics", vec![Definition::new(*def)]);
            w.chapter_id = Some(chapter.to_string());
            w
        })
        .collect()
}

/// Store backed by a vector that records every update.
pub struct RecordingStore {
    words: Vec<Word>,
    pub updates: Mutex<Vec<Word>>,
}

impl RecordingStore {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn updates(&self) -> Vec<Word> {
        self.updates.lock().unwrap().clone()
    }
}

impl VocabularyStore for RecordingStore {
    fn list_books(&self) -> Result<Vec<Book>> {
        Ok(vec![Book {
            name: "Basics".to_string(),
        }])
    }

    fn list_chapters(&self, book_name: &str) -> Result<Vec<Chapter>> {
        Ok(["ch1", "ch2"]
            .iter()
            .map(|id| Chapter {
                id: id.to_string(),
                name: format!("Chapter {}", &id[2..]),
                book_name: book_name.to_string(),
            })
            .collect())
    }

    fn list_words_by_chapters(&self, chapter_ids: &[String]) -> Result<Vec<Word>> {
        Ok(self
            .words
            .iter()
            .filter(|w| {
                w.chapter_id
                    .as_ref()
                    .map(|c| chapter_ids.contains(c))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn list_words_by_book(&self, book_name: &str) -> Result<Vec<Word>> {
        Ok(self
            .words
            .iter()
            .filter(|w| w.book == book_name)
            .cloned()
            .collect())
    }

    fn update_word(&self, word: &Word) -> Result<()> {
        self.updates.lock().unwrap().push(word.clone());
        Ok(())
    }
}

/// Store whose every call fails.
pub struct FailingStore;

impl VocabularyStore for FailingStore {
    fn list_books(&self) -> Result<Vec<Book>> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn list_chapters(&self, _book_name: &str) -> Result<Vec<Chapter>> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn list_words_by_chapters(&self, _chapter_ids: &[String]) -> Result<Vec<Word>> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn list_words_by_book(&self, _book_name: &str) -> Result<Vec<Word>> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn update_word(&self, word: &Word) -> Result<()> {
        Err(StoreError::Backend(format!("cannot update {}", word.id)))
    }
}

/// Speaker that remembers `(text, locale)` pairs.
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Mutex<Vec<(String, String)>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.spoken.lock().unwrap().clear();
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str, locale: &str) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), locale.to_string()));
    }
}
