//! Working copy of the selected words.
//!
//! Keeps the current (possibly shuffled) order next to the order the words were
//! loaded in, so shuffling can be undone exactly.

use rand::Rng;

use crate::shuffle::shuffle_with;
use crate::types::Word;

#[derive(Debug, Clone, Default)]
pub struct WordSet {
    current: Vec<Word>,
    original: Vec<Word>,
    shuffled: bool,
}

impl WordSet {
    pub fn new(words: Vec<Word>) -> Self {
        let mut set = Self::default();
        set.load(words);
        set
    }

    /// Replace both orders with `words` and clear the shuffle flag.
    pub fn load(&mut self, words: Vec<Word>) {
        self.original = words.clone();
        self.current = words;
        self.shuffled = false;
    }

    pub fn words(&self) -> &[Word] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Shuffle the current list, or restore the loaded order if already shuffled.
    pub fn toggle_shuffle(&mut self) {
        self.toggle_shuffle_with(&mut rand::thread_rng());
    }

    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shuffled {
            self.current = self.original.clone();
            self.shuffled = false;
        } else {
            self.current = shuffle_with(&self.current, rng);
            self.shuffled = true;
        }
    }

    /// Words not yet memorized, in current order.
    pub fn unmemorized(&self) -> Vec<&Word> {
        self.current.iter().filter(|w| !w.memorized).collect()
    }

    pub fn memorized_count(&self) -> usize {
        self.current.iter().filter(|w| w.memorized).count()
    }

    pub fn get(&self, id: &str) -> Option<&Word> {
        self.current.iter().find(|w| w.id == id)
    }

    /// Apply `f` to the word with `id` in both orders. Returns the updated word.
    pub fn update<F>(&mut self, id: &str, f: F) -> Option<Word>
    where
        F: Fn(&mut Word),
    {
        if let Some(word) = self.original.iter_mut().find(|w| w.id == id) {
            f(word);
        }
        let word = self.current.iter_mut().find(|w| w.id == id)?;
        f(word);
        Some(word.clone())
    }
}
