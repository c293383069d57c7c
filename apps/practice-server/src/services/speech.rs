//! Pending speech output for a memorize session.
//!
//! The server cannot play audio, so utterances are queued and handed to the
//! client when it polls.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vocab_core::Speaker;

/// Oldest utterances are dropped past this many.
pub const QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    pub queued_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SpeechQueue {
    pending: Mutex<VecDeque<Utterance>>,
}

impl SpeechQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything queued so far.
    pub fn drain(&self) -> Vec<Utterance> {
        match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Speaker for SpeechQueue {
    fn speak(&self, text: &str, locale: &str) {
        let Ok(mut pending) = self.pending.lock() else {
            tracing::warn!("Speech queue unavailable, dropping {:?}", text);
            return;
        };
        if pending.len() >= QUEUE_CAPACITY {
            pending.pop_front();
        }
        pending.push_back(Utterance {
            text: text.to_string(),
            locale: locale.to_string(),
            queued_at: Utc::now(),
        });
    }
}
