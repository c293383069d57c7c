//! Flashcard memorize session.
//!
//! Navigation is reveal-then-move: `next` first shows the definition, the
//! second `next` hides it and moves on. `prev` mirrors that. Any manual
//! interaction stops autoplay before it takes effect.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::autoplay::{Autoplay, Beat};
use crate::catalog::{load_words, Selection};
use crate::keys::{command_for_key, KeyCommand};
use crate::store::{Speaker, VocabularyStore};
use crate::types::{Direction, PracticeSettings, Word};
use crate::word_set::WordSet;

/// Result of pushing a word change to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum UpdateOutcome {
    Saved,
    /// The store rejected the change. `reverted` tells whether the local
    /// change was undone.
    Failed { reverted: bool },
    UnknownWord,
}

/// Counters for the memorize view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based, 0 when the effective list is empty.
    pub position: usize,
    pub effective_total: usize,
    pub total_words: usize,
    pub memorized: usize,
    pub unmemorized: usize,
    pub showing_definition: bool,
    pub filter_unmemorized: bool,
    pub shuffled: bool,
    pub autoplay: bool,
    pub pronunciation: bool,
}

pub struct FlashcardSession {
    words: WordSet,
    index: usize,
    showing_definition: bool,
    filter_unmemorized: bool,
    pronunciation_enabled: bool,
    autoplay: Autoplay,
    settings: PracticeSettings,
    store: Arc<dyn VocabularyStore>,
    speaker: Arc<dyn Speaker>,
}

impl FlashcardSession {
    pub fn new(
        settings: PracticeSettings,
        store: Arc<dyn VocabularyStore>,
        speaker: Arc<dyn Speaker>,
    ) -> Self {
        Self {
            words: WordSet::default(),
            index: 0,
            showing_definition: false,
            filter_unmemorized: false,
            pronunciation_enabled: settings.pronunciation_enabled,
            autoplay: Autoplay::new(&settings),
            settings,
            store,
            speaker,
        }
    }

    /// Replace the word list and go back to the first card.
    pub fn load(&mut self, words: Vec<Word>) {
        self.stop_autoplay();
        self.words.load(words);
        self.index = 0;
        self.showing_definition = false;
        tracing::debug!("Loaded {} words into memorize session", self.words.len());
    }

    /// Load the words of a book/chapter selection from the store.
    pub fn load_selection(&mut self, selection: &Selection) {
        let words = load_words(self.store.as_ref(), selection);
        self.load(words);
    }

    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    pub fn words(&self) -> &WordSet {
        &self.words
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_showing_definition(&self) -> bool {
        self.showing_definition
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_unmemorized
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn autoplay_generation(&self) -> u64 {
        self.autoplay.generation()
    }

    pub fn is_pronouncing(&self) -> bool {
        self.pronunciation_enabled
    }

    /// The list currently in play: every word, or only unmemorized ones.
    pub fn effective(&self) -> Vec<&Word> {
        if self.filter_unmemorized {
            self.words.unmemorized()
        } else {
            self.words.words().iter().collect()
        }
    }

    pub fn effective_len(&self) -> usize {
        if self.filter_unmemorized {
            self.words.len() - self.words.memorized_count()
        } else {
            self.words.len()
        }
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.effective().get(self.index).copied()
    }

    pub fn progress(&self) -> Progress {
        let effective_total = self.effective_len();
        let memorized = self.words.memorized_count();
        Progress {
            position: if effective_total == 0 { 0 } else { self.index + 1 },
            effective_total,
            total_words: self.words.len(),
            memorized,
            unmemorized: self.words.len() - memorized,
            showing_definition: self.showing_definition,
            filter_unmemorized: self.filter_unmemorized,
            shuffled: self.words.is_shuffled(),
            autoplay: self.autoplay.is_running(),
            pronunciation: self.pronunciation_enabled,
        }
    }

    pub fn advance(&mut self, direction: Direction) {
        self.stop_autoplay();
        let len = self.effective_len();
        if len == 0 {
            return;
        }

        let before = self.index;
        match (direction, self.showing_definition) {
            (Direction::Next, false) => self.showing_definition = true,
            (Direction::Next, true) => {
                self.showing_definition = false;
                self.index = (self.index + 1) % len;
            }
            (Direction::Prev, true) => self.showing_definition = false,
            (Direction::Prev, false) => {
                self.showing_definition = true;
                self.index = (self.index + len - 1) % len;
            }
        }

        if self.index != before {
            self.announce_current();
        }
    }

    /// Show or hide the definition without moving.
    pub fn toggle_definition(&mut self) {
        self.stop_autoplay();
        if self.effective_len() > 0 {
            self.showing_definition = !self.showing_definition;
        }
    }

    /// Jump back to the first card with the definition hidden.
    pub fn reset_position(&mut self) {
        self.stop_autoplay();
        self.index = 0;
        self.showing_definition = false;
    }

    pub fn toggle_filter(&mut self) {
        self.stop_autoplay();
        self.filter_unmemorized = !self.filter_unmemorized;
        self.index = 0;
        self.showing_definition = false;
    }

    pub fn toggle_shuffle(&mut self) {
        self.toggle_shuffle_with(&mut rand::thread_rng());
    }

    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.stop_autoplay();
        self.words.toggle_shuffle_with(rng);
        self.index = 0;
        self.showing_definition = false;
    }

    /// Count one more review of a word. Store failures keep the local count.
    pub fn mark_reviewed(&mut self, word_id: &str) -> UpdateOutcome {
        let Some(updated) = self.words.update(word_id, |w| w.count += 1) else {
            return UpdateOutcome::UnknownWord;
        };

        match self.store.update_word(&updated) {
            Ok(()) => UpdateOutcome::Saved,
            Err(e) => {
                tracing::warn!("Failed to update review count for {}: {}", word_id, e);
                UpdateOutcome::Failed { reverted: false }
            }
        }
    }

    /// Flip the memorized flag. Store failures restore the previous flag.
    pub fn toggle_memorized(&mut self, word_id: &str) -> UpdateOutcome {
        let Some(previous) = self.words.get(word_id).map(|w| w.memorized) else {
            return UpdateOutcome::UnknownWord;
        };
        let filtered_len = self.effective_len();

        let Some(updated) = self.words.update(word_id, |w| w.memorized = !previous) else {
            return UpdateOutcome::UnknownWord;
        };

        if let Err(e) = self.store.update_word(&updated) {
            tracing::warn!("Failed to update memorized status for {}: {}", word_id, e);
            self.words.update(word_id, |w| w.memorized = previous);
            return UpdateOutcome::Failed { reverted: true };
        }

        // A word memorized under the filter leaves the view.
        if self.filter_unmemorized && !previous && self.index + 1 >= filtered_len {
            self.index = 0;
        }
        if self.index >= self.effective_len() {
            self.index = 0;
        }
        if self.effective_len() == 0 {
            self.stop_autoplay();
            self.showing_definition = false;
        }
        UpdateOutcome::Saved
    }

    /// Turn pronunciation on or off. Turning it on speaks the current word.
    pub fn toggle_pronunciation(&mut self) {
        self.pronunciation_enabled = !self.pronunciation_enabled;
        if self.pronunciation_enabled {
            if let Some(word) = self.current_word() {
                self.speaker.speak(&word.word, &self.settings.word_locale);
            }
        }
    }

    /// Start passive review. No-op when running or when there is nothing to show.
    pub fn start_autoplay(&mut self) -> bool {
        if self.effective_len() == 0 || !self.autoplay.start() {
            return false;
        }
        self.showing_definition = false;
        tracing::debug!("Autoplay started (generation {})", self.autoplay.generation());
        true
    }

    pub fn stop_autoplay(&mut self) -> bool {
        let stopped = self.autoplay.stop();
        if stopped {
            tracing::debug!("Autoplay stopped");
        }
        stopped
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        if self.autoplay.is_running() {
            self.stop_autoplay();
        } else {
            self.start_autoplay();
        }
        self.autoplay.is_running()
    }

    /// Apply one autoplay beat. Returns false when autoplay is not running.
    /// An empty view stops autoplay instead of ticking.
    pub fn tick(&mut self) -> bool {
        if self.effective_len() == 0 {
            if self.stop_autoplay() {
                self.showing_definition = false;
            }
            return false;
        }
        let Some(beat) = self.autoplay.tick() else {
            return false;
        };

        match beat {
            Beat::Reveal { .. } => self.showing_definition = true,
            Beat::Toggle { .. } => self.showing_definition = !self.showing_definition,
            Beat::Advance => {
                self.showing_definition = false;
                let len = self.effective_len();
                if len > 0 {
                    self.index = (self.index + 1) % len;
                }
            }
        }

        if beat.pronounce() {
            self.pronounce_current();
        }
        true
    }

    /// Tick on behalf of a timer started for `generation`. Stale timers get false.
    pub fn tick_generation(&mut self, generation: u64) -> bool {
        if generation != self.autoplay.generation() {
            return false;
        }
        self.tick()
    }

    /// Handle a keyboard key. Returns true if it mapped to a command.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.effective_len() == 0 {
            return false;
        }
        match command_for_key(key) {
            Some(KeyCommand::Navigate(direction)) => self.advance(direction),
            Some(KeyCommand::ToggleAutoplay) => {
                self.toggle_autoplay();
            }
            None => return false,
        }
        true
    }

    /// Teardown. Stops autoplay so no timer outlives the session.
    pub fn close(&mut self) {
        self.stop_autoplay();
    }

    fn announce_current(&self) {
        if !self.pronunciation_enabled || self.autoplay.is_running() {
            return;
        }
        if let Some(word) = self.current_word() {
            self.speaker.speak(&word.word, &self.settings.word_locale);
        }
    }

    fn pronounce_current(&self) {
        if !self.pronunciation_enabled {
            return;
        }
        let Some(word) = self.current_word() else {
            return;
        };
        self.speaker.speak(&word.word, &self.settings.word_locale);
        for def in &word.definitions {
            self.speaker.speak(&def.definition, &self.settings.definition_locale);
        }
    }
}
