//! In-memory vocabulary store, optionally seeded from a JSON file.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vocab_core::{sort_chapters, Book, Chapter, StoreError, VocabularyStore, Word};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub books: Vec<Book>,
    pub chapters: Vec<Chapter>,
    pub words: Vec<Word>,
}

/// Thread-safe store holding books, chapters and words in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<SeedData>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(seed: SeedData) -> Self {
        Self {
            data: RwLock::new(seed),
            offline: AtomicBool::new(false),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&content)?;
        tracing::info!(
            "Loaded {} books, {} chapters, {} words",
            seed.books.len(),
            seed.chapters.len(),
            seed.words.len()
        );
        Ok(Self::new(seed))
    }

    /// Make every call fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn word(&self, id: &str) -> Option<Word> {
        self.read().ok()?.words.iter().find(|w| w.id == id).cloned()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, SeedData>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        self.data
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

impl VocabularyStore for MemoryStore {
    fn list_books(&self) -> vocab_core::Result<Vec<Book>> {
        let data = self.read()?;
        let mut books = data.books.clone();
        for word in &data.words {
            if !books.iter().any(|b| b.name == word.book) {
                books.push(Book {
                    name: word.book.clone(),
                });
            }
        }
        Ok(books)
    }

    fn list_chapters(&self, book_name: &str) -> vocab_core::Result<Vec<Chapter>> {
        let data = self.read()?;
        let mut chapters: Vec<Chapter> = data
            .chapters
            .iter()
            .filter(|c| c.book_name == book_name)
            .cloned()
            .collect();
        sort_chapters(&mut chapters);
        Ok(chapters)
    }

    fn list_words_by_chapters(&self, chapter_ids: &[String]) -> vocab_core::Result<Vec<Word>> {
        if chapter_ids.is_empty() {
            return Ok(Vec::new());
        }
        let data = self.read()?;
        Ok(data
            .words
            .iter()
            .filter(|w| {
                w.chapter_id
                    .as_ref()
                    .map(|id| chapter_ids.contains(id))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn list_words_by_book(&self, book_name: &str) -> vocab_core::Result<Vec<Word>> {
        let data = self.read()?;
        Ok(data
            .words
            .iter()
            .filter(|w| w.book == book_name)
            .cloned()
            .collect())
    }

    fn update_word(&self, word: &Word) -> vocab_core::Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        let existing = data
            .words
            .iter_mut()
            .find(|w| w.id == word.id)
            .ok_or_else(|| StoreError::WordNotFound(word.id.clone()))?;
        *existing = word.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::Definition;

    fn seed() -> SeedData {
        let mut words = Vec::new();
        let entries = [("run", "달리다", "c1"), ("jump", "뛰다", "c2"), ("eat", "먹다", "c2")];
        for (i, (text, def, chapter)) in entries.iter().enumerate() {
            let mut w = Word::new(
                format!("w{}", i),
                *text,
                "Basics",
                vec![Definition::new(*def)],
            );
            w.chapter_id = Some(chapter.to_string());
            words.push(w);
        }
        SeedData {
            books: vec![Book {
                name: "Basics".to_string(),
            }],
            chapters: vec![
                Chapter {
                    id: "c2".to_string(),
                    name: "Day 10".to_string(),
                    book_name: "Basics".to_string(),
                },
                Chapter {
                    id: "c1".to_string(),
                    name: "Day 2".to_string(),
                    book_name: "Basics".to_string(),
                },
            ],
            words,
        }
    }

    #[test]
    fn chapters_are_sorted_by_number() {
        let store = MemoryStore::new(seed());
        let names: Vec<String> = store
            .list_chapters("Basics")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Day 2", "Day 10"]);
    }

    #[test]
    fn empty_chapter_list_returns_nothing() {
        let store = MemoryStore::new(seed());
        store.set_offline(true);
        // No lookup happens for empty input, so the outage is not observed.
        assert!(store.list_words_by_chapters(&[]).unwrap().is_empty());
    }

    #[test]
    fn words_by_chapter_and_book() {
        let store = MemoryStore::new(seed());
        assert_eq!(store.list_words_by_chapters(&["c2".to_string()]).unwrap().len(), 2);
        assert_eq!(store.list_words_by_book("Basics").unwrap().len(), 3);
        assert!(store.list_words_by_book("Other").unwrap().is_empty());
    }

    #[test]
    fn books_include_those_named_by_words() {
        let mut data = seed();
        data.words[0].book = "Extra".to_string();
        let store = MemoryStore::new(data);
        let names: Vec<String> = store.list_books().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Basics", "Extra"]);
    }

    #[test]
    fn update_replaces_word() {
        let store = MemoryStore::new(seed());
        let mut word = store.word("w1").unwrap();
        word.memorized = true;
        word.count = 4;
        store.update_word(&word).unwrap();
        assert_eq!(store.word("w1"), Some(word));
    }

    #[test]
    fn update_unknown_word_fails() {
        let store = MemoryStore::new(seed());
        let word = Word::new("zzz", "ghost", "Basics", vec![]);
        assert_eq!(
            store.update_word(&word),
            Err(StoreError::WordNotFound("zzz".to_string()))
        );
    }

    #[test]
    fn offline_store_rejects_calls() {
        let store = MemoryStore::new(seed());
        store.set_offline(true);
        assert!(store.list_books().is_err());
        let word = store.data.read().unwrap().words[0].clone();
        assert!(matches!(store.update_word(&word), Err(StoreError::Unavailable(_))));
        store.set_offline(false);
        assert!(store.update_word(&word).is_ok());
    }

    #[test]
    fn seed_file_round_trip() {
        let path = std::env::temp_dir().join(format!("vocab-seed-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&seed()).unwrap()).unwrap();
        let store = MemoryStore::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(store.list_words_by_book("Basics").unwrap().len(), 3);
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let result = MemoryStore::from_json_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
