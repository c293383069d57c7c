//! Background timers driving autoplay and quiz countdowns.
//!
//! Each timer is tagged with the key it was started for. Replacing or
//! cancelling a slot aborts the old task, and an autoplay task whose
//! generation went stale stops on its next tick anyway.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use vocab_core::{FlashcardSession, QuizPhase, QuizRunner};

/// Quiz countdown resolution.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Holds at most one running timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    inner: Mutex<Option<(u64, JoinHandle<()>)>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the live timer, if one is still running.
    pub fn active_key(&self) -> Option<u64> {
        let guard = self.inner.lock().ok()?;
        match guard.as_ref() {
            Some((key, handle)) if !handle.is_finished() => Some(*key),
            _ => None,
        }
    }

    pub fn replace(&self, key: u64, handle: JoinHandle<()>) {
        let Ok(mut guard) = self.inner.lock() else {
            handle.abort();
            return;
        };
        if let Some((_, old)) = guard.replace((key, handle)) {
            old.abort();
        }
    }

    pub fn cancel(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            if let Some((key, handle)) = guard.take() {
                tracing::debug!("Cancelling timer {}", key);
                handle.abort();
            }
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Tick `session` every `period` for as long as `generation` is current.
pub fn spawn_autoplay(
    session: Arc<AsyncMutex<FlashcardSession>>,
    generation: u64,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let mut session = session.lock().await;
            if !session.tick_generation(generation) {
                tracing::debug!("Autoplay timer {} retired", generation);
                break;
            }
        }
    })
}

/// Count the quiz down once per second until it leaves the in-progress phase.
pub fn spawn_countdown(runner: Arc<AsyncMutex<QuizRunner>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + COUNTDOWN_PERIOD, COUNTDOWN_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let mut runner = runner.lock().await;
            if runner.phase() != QuizPhase::InProgress {
                break;
            }
            if let Some(result) = runner.tick() {
                tracing::debug!("Question for {} timed out", result.question.word_id);
            }
            if runner.phase() != QuizPhase::InProgress {
                break;
            }
        }
    })
}
