//! Quiz question generation.
//!
//! Questions are drawn from a shuffled copy of the word set, one per word.
//! Multiple-choice distractors come from the other words of the same set.

use std::collections::HashSet;

use rand::Rng;

use super::Question;
use crate::shuffle::shuffle_with;
use crate::types::{AnswerMode, Orientation, Word};

/// Upper bound on wrong options per question.
pub const MAX_DISTRACTORS: usize = 3;

/// Every multiple-choice question offers at least this many options.
pub const MIN_OPTIONS: usize = 2;

/// Build up to `count` questions using the thread-local RNG.
pub fn generate(
    words: &[Word],
    count: usize,
    orientation: Orientation,
    answer_mode: AnswerMode,
) -> Vec<Question> {
    generate_with(words, count, orientation, answer_mode, &mut rand::thread_rng())
}

/// Build up to `count` questions. Fewer than two words yields no questions.
pub fn generate_with<R: Rng + ?Sized>(
    words: &[Word],
    count: usize,
    orientation: Orientation,
    answer_mode: AnswerMode,
    rng: &mut R,
) -> Vec<Question> {
    if words.len() < 2 {
        tracing::warn!("Not enough words for a quiz: {}", words.len());
        return Vec::new();
    }

    let pool: Vec<&Word> = words.iter().collect();
    let pool = shuffle_with(&pool, rng);

    let mut questions = Vec::with_capacity(count.min(words.len()));
    for word in pool.into_iter().take(count) {
        questions.push(build_question(word, words, orientation, answer_mode, rng));
    }
    questions
}

fn build_question<R: Rng + ?Sized>(
    word: &Word,
    words: &[Word],
    orientation: Orientation,
    answer_mode: AnswerMode,
    rng: &mut R,
) -> Question {
    let definition = word.primary_definition().to_string();
    let (prompt, correct_answer) = match orientation {
        Orientation::WordToDefinition => (word.word.clone(), definition),
        Orientation::DefinitionToWord => (definition, word.word.clone()),
    };

    let options = match answer_mode {
        AnswerMode::TextInput => None,
        AnswerMode::MultipleChoice => {
            Some(build_options(word, words, orientation, &correct_answer, rng))
        }
    };

    Question {
        word_id: word.id.clone(),
        prompt,
        correct_answer,
        options,
        orientation,
        answer_mode,
    }
}

fn build_options<R: Rng + ?Sized>(
    word: &Word,
    words: &[Word],
    orientation: Orientation,
    correct: &str,
    rng: &mut R,
) -> Vec<String> {
    let mut candidates: Vec<&str> = Vec::new();
    for other in words.iter().filter(|w| w.id != word.id) {
        match orientation {
            Orientation::WordToDefinition => {
                candidates.extend(other.definitions.iter().map(|d| d.definition.as_str()))
            }
            Orientation::DefinitionToWord => candidates.push(other.word.as_str()),
        }
    }

    let mut seen = HashSet::new();
    candidates.retain(|c| !c.trim().is_empty() && *c != correct && seen.insert(*c));

    let mut options: Vec<String> = shuffle_with(&candidates, rng)
        .into_iter()
        .take(MAX_DISTRACTORS)
        .map(str::to_string)
        .collect();
    options.push(correct.to_string());

    let mut filler = 1;
    while options.len() < MIN_OPTIONS {
        tracing::warn!("No distractors for {:?}, padding options", word.word);
        options.push(format!("(extra option {})", filler));
        filler += 1;
    }

    shuffle_with(&options, rng)
}
