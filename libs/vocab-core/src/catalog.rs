//! Book and chapter selection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::store::VocabularyStore;
use crate::types::{Chapter, Word};

/// Number formed by the digits of a chapter name ("Day 12" -> 12).
fn chapter_number(name: &str) -> Option<u64> {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Order chapters by the number in their name. Unnumbered chapters go last,
/// sorted by name.
pub fn sort_chapters(chapters: &mut [Chapter]) {
    chapters.sort_by(|a, b| {
        match (chapter_number(&a.name), chapter_number(&b.name)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        }
    });
}

/// Which book and chapters the learner picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub book: Option<String>,
    pub chapter_ids: Vec<String>,
}

impl Selection {
    pub fn book(name: impl Into<String>) -> Self {
        Self {
            book: Some(name.into()),
            chapter_ids: Vec::new(),
        }
    }

    /// Switch books. Chapter picks belong to the old book and are dropped.
    pub fn select_book(&mut self, name: impl Into<String>) {
        self.book = Some(name.into());
        self.chapter_ids.clear();
    }

    pub fn toggle_chapter(&mut self, chapter_id: &str, checked: bool) {
        let present = self.chapter_ids.iter().any(|id| id == chapter_id);
        if checked && !present {
            self.chapter_ids.push(chapter_id.to_string());
        } else if !checked {
            self.chapter_ids.retain(|id| id != chapter_id);
        }
    }

    pub fn select_all(&mut self, chapters: &[Chapter]) {
        self.chapter_ids = chapters.iter().map(|c| c.id.clone()).collect();
    }

    pub fn clear_chapters(&mut self) {
        self.chapter_ids.clear();
    }
}

/// Fetch the words for a selection: picked chapters first, then the whole book.
/// Store failures are logged and produce an empty list.
pub fn load_words(store: &dyn VocabularyStore, selection: &Selection) -> Vec<Word> {
    let result = if !selection.chapter_ids.is_empty() {
        store.list_words_by_chapters(&selection.chapter_ids)
    } else if let Some(book) = &selection.book {
        store.list_words_by_book(book)
    } else {
        return Vec::new();
    };

    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load words for {:?}: {}", selection, e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_words, FailingStore, RecordingStore};
    use pretty_assertions::assert_eq;

    fn chapter(id: &str, name: &str) -> Chapter {
        Chapter {
            id: id.to_string(),
            name: name.to_string(),
            book_name: "Book".to_string(),
        }
    }

    #[test]
    fn chapters_sort_numerically() {
        let mut chapters = vec![
            chapter("a", "Day 10"),
            chapter("b", "Appendix"),
            chapter("c", "Day 2"),
            chapter("d", "Day 1"),
            chapter("e", "Review"),
        ];
        sort_chapters(&mut chapters);
        let names: Vec<&str> = chapters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Day 1", "Day 2", "Day 10", "Appendix", "Review"]);
    }

    #[test]
    fn selecting_book_clears_chapters() {
        let mut selection = Selection::book("A");
        selection.toggle_chapter("c1", true);
        selection.toggle_chapter("c1", true);
        assert_eq!(selection.chapter_ids, vec!["c1"]);
        selection.select_book("B");
        assert!(selection.chapter_ids.is_empty());
        assert_eq!(selection.book.as_deref(), Some("B"));
    }

    #[test]
    fn select_all_and_clear() {
        let mut selection = Selection::book("Book");
        selection.select_all(&[chapter("1", "Day 1"), chapter("2", "Day 2")]);
        assert_eq!(selection.chapter_ids, vec!["1", "2"]);
        selection.toggle_chapter("1", false);
        assert_eq!(selection.chapter_ids, vec!["2"]);
        selection.clear_chapters();
        assert!(selection.chapter_ids.is_empty());
    }

    #[test]
    fn load_prefers_chapters_over_book() {
        let store = RecordingStore::new(sample_words());
        let mut selection = Selection::book("Basics");
        assert_eq!(load_words(&store, &selection).len(), 4);

        selection.toggle_chapter("ch1", true);
        let words = load_words(&store, &selection);
        assert!(words.iter().all(|w| w.chapter_id.as_deref() == Some("ch1")));
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn load_without_selection_is_empty() {
        let store = RecordingStore::new(sample_words());
        assert!(load_words(&store, &Selection::default()).is_empty());
    }

    #[test]
    fn load_failure_yields_empty() {
        assert!(load_words(&FailingStore, &Selection::book("Basics")).is_empty());
    }
}
