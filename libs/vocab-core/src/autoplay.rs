//! Autoplay beat counter.
//!
//! The scheduler only counts beats and says what each beat means. The owning
//! session applies the effect, so a tick always sees current session state.
//! Every start and stop bumps the generation; a timer holding an older
//! generation must not tick.

use crate::types::PracticeSettings;

/// What a single beat asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    /// First beat of a word: show the definition.
    Reveal { pronounce: bool },
    /// Flip definition visibility.
    Toggle { pronounce: bool },
    /// Hide the definition and move to the next word.
    Advance,
}

impl Beat {
    pub fn pronounce(self) -> bool {
        match self {
            Self::Reveal { pronounce } | Self::Toggle { pronounce } => pronounce,
            Self::Advance => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Autoplay {
    running: bool,
    beat: u32,
    generation: u64,
    beats_per_word: u32,
    pronounce_beats: Vec<u32>,
}

impl Autoplay {
    pub fn new(settings: &PracticeSettings) -> Self {
        Self {
            running: false,
            beat: 0,
            generation: 0,
            beats_per_word: settings.beats_per_word.max(1),
            pronounce_beats: settings.pronounce_beats.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn beat(&self) -> u32 {
        self.beat
    }

    /// Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.beat = 0;
        self.generation += 1;
        true
    }

    /// Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.beat = 0;
        self.generation += 1;
        true
    }

    /// Count one beat. `None` when stopped.
    pub fn tick(&mut self) -> Option<Beat> {
        if !self.running {
            return None;
        }
        self.beat += 1;
        if self.beat >= self.beats_per_word {
            self.beat = 0;
            return Some(Beat::Advance);
        }
        let pronounce = self.pronounce_beats.contains(&self.beat);
        if self.beat == 1 {
            Some(Beat::Reveal { pronounce })
        } else {
            Some(Beat::Toggle { pronounce })
        }
    }
}
