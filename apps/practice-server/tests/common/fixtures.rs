//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};
use vocab_core::{Book, Chapter, Definition, PracticeSettings, Word};

use vocab_practice_server::services::store::SeedData;

fn word(id: &str, text: &str, definition: &str, chapter: &str) -> Word {
    let mut word = Word::new(id, text, "Basics", vec![Definition::new(definition)]);
    word.chapter_id = Some(chapter.to_string());
    word
}

fn chapter(id: &str, name: &str) -> Chapter {
    Chapter {
        id: id.to_string(),
        name: name.to_string(),
        book_name: "Basics".to_string(),
    }
}

/// One book, three chapters listed out of order, five words.
///
/// - ch-10 "Day 10": eat, sleep
/// - ch-2 "Day 2": run, jump, walk
/// - ch-x "Review": no words
pub fn seed_data() -> SeedData {
    SeedData {
        books: vec![
            Book {
                name: "Basics".to_string(),
            },
            Book {
                name: "Empty".to_string(),
            },
        ],
        chapters: vec![
            chapter("ch-10", "Day 10"),
            chapter("ch-x", "Review"),
            chapter("ch-2", "Day 2"),
        ],
        words: vec![
            word("w-run", "run", "달리다", "ch-2"),
            word("w-jump", "jump", "뛰다", "ch-2"),
            word("w-walk", "walk", "걷다", "ch-2"),
            word("w-eat", "eat", "먹다", "ch-10"),
            word("w-sleep", "sleep", "자다", "ch-10"),
        ],
    }
}

/// Defaults with pronunciation off, so utterance queues only hold what a test asks for.
pub fn quiet_settings() -> PracticeSettings {
    PracticeSettings {
        pronunciation_enabled: false,
        ..PracticeSettings::default()
    }
}

pub fn book_selection(book: &str) -> Value {
    json!({ "book": book, "chapter_ids": [] })
}

pub fn chapter_selection(chapter_ids: &[&str]) -> Value {
    json!({ "book": "Basics", "chapter_ids": chapter_ids })
}

pub fn quiz_settings(total: usize, time_limit_secs: u32, answer_mode: &str) -> Value {
    json!({
        "total_questions": total,
        "time_limit_secs": time_limit_secs,
        "orientation": "word_to_definition",
        "answer_mode": answer_mode,
    })
}
