//! Registry of live memorize sessions and quizzes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;
use vocab_core::{FlashcardSession, QuizPhase, QuizRunner};

use super::speech::SpeechQueue;
use super::timers::{spawn_autoplay, spawn_countdown, TimerSlot};

/// Longest gap between idle sweeps.
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// When a handle was last looked up.
#[derive(Debug)]
struct LastSeen(Mutex<Instant>);

impl LastSeen {
    fn now() -> Self {
        Self(Mutex::new(Instant::now()))
    }

    fn touch(&self) {
        if let Ok(mut at) = self.0.lock() {
            *at = Instant::now();
        }
    }

    fn idle_for(&self, now: Instant) -> Duration {
        self.0
            .lock()
            .map(|at| now.saturating_duration_since(*at))
            .unwrap_or_default()
    }
}

/// A memorize session plus its speech queue and autoplay timer.
pub struct MemorizeHandle {
    pub session: Arc<AsyncMutex<FlashcardSession>>,
    pub speech: Arc<SpeechQueue>,
    timer: TimerSlot,
    last_seen: LastSeen,
}

impl MemorizeHandle {
    pub fn new(session: FlashcardSession, speech: Arc<SpeechQueue>) -> Self {
        Self {
            session: Arc::new(AsyncMutex::new(session)),
            speech,
            timer: TimerSlot::new(),
            last_seen: LastSeen::now(),
        }
    }

    /// Make the background timer match the session's autoplay state.
    /// Call with the session lock held, after any mutation.
    pub fn sync_timer(&self, session: &FlashcardSession) {
        if !session.is_autoplaying() {
            self.timer.cancel();
            return;
        }
        let generation = session.autoplay_generation();
        if self.timer.active_key() == Some(generation) {
            return;
        }
        let period = Duration::from_millis(session.settings().tick_interval_ms);
        self.timer
            .replace(generation, spawn_autoplay(self.session.clone(), generation, period));
    }

    pub fn cancel_timer(&self) {
        self.timer.cancel();
    }
}

/// A quiz runner plus its countdown.
pub struct QuizHandle {
    pub runner: Arc<AsyncMutex<QuizRunner>>,
    timer: TimerSlot,
    last_seen: LastSeen,
}

impl QuizHandle {
    pub fn new(runner: QuizRunner) -> Self {
        Self {
            runner: Arc::new(AsyncMutex::new(runner)),
            timer: TimerSlot::new(),
            last_seen: LastSeen::now(),
        }
    }

    /// Restart the countdown for the current question. Keyed by how many
    /// answers are recorded so each question gets a fresh one-second grid.
    pub fn sync_timer(&self, runner: &QuizRunner) {
        if runner.phase() != QuizPhase::InProgress {
            self.timer.cancel();
            return;
        }
        let key = runner.results().len() as u64;
        if self.timer.active_key() == Some(key) {
            return;
        }
        self.timer.replace(key, spawn_countdown(self.runner.clone()));
    }

    pub fn cancel_timer(&self) {
        self.timer.cancel();
    }
}

#[derive(Default)]
pub struct Sessions {
    memorize: RwLock<HashMap<Uuid, Arc<MemorizeHandle>>>,
    quizzes: RwLock<HashMap<Uuid, Arc<QuizHandle>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_memorize(&self, handle: MemorizeHandle) -> Uuid {
        let id = Uuid::new_v4();
        if let Ok(mut map) = self.memorize.write() {
            map.insert(id, Arc::new(handle));
        }
        id
    }

    pub fn memorize(&self, id: &Uuid) -> Option<Arc<MemorizeHandle>> {
        let handle = self.memorize.read().ok()?.get(id).cloned()?;
        handle.last_seen.touch();
        Some(handle)
    }

    pub fn remove_memorize(&self, id: &Uuid) -> Option<Arc<MemorizeHandle>> {
        self.memorize.write().ok()?.remove(id)
    }

    pub fn insert_quiz(&self, handle: QuizHandle) -> Uuid {
        let id = Uuid::new_v4();
        if let Ok(mut map) = self.quizzes.write() {
            map.insert(id, Arc::new(handle));
        }
        id
    }

    pub fn quiz(&self, id: &Uuid) -> Option<Arc<QuizHandle>> {
        let handle = self.quizzes.read().ok()?.get(id).cloned()?;
        handle.last_seen.touch();
        Some(handle)
    }

    pub fn remove_quiz(&self, id: &Uuid) -> Option<Arc<QuizHandle>> {
        self.quizzes.write().ok()?.remove(id)
    }

    pub fn memorize_count(&self) -> usize {
        self.memorize.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn quiz_count(&self) -> usize {
        self.quizzes.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Drop sessions and quizzes nobody has looked up for `max_idle`,
    /// stopping their timers. Returns how many were dropped.
    pub async fn sweep(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let memorize: Vec<(Uuid, Arc<MemorizeHandle>)> = match self.memorize.write() {
            Ok(mut map) => drain_idle(&mut map, |h| h.last_seen.idle_for(now) >= max_idle),
            Err(_) => Vec::new(),
        };
        let quizzes: Vec<(Uuid, Arc<QuizHandle>)> = match self.quizzes.write() {
            Ok(mut map) => drain_idle(&mut map, |h| h.last_seen.idle_for(now) >= max_idle),
            Err(_) => Vec::new(),
        };

        for (id, handle) in &memorize {
            handle.session.lock().await.close();
            handle.cancel_timer();
            tracing::info!("Expired idle memorize session {}", id);
        }
        for (id, handle) in &quizzes {
            handle.cancel_timer();
            tracing::info!("Expired idle quiz {}", id);
        }
        memorize.len() + quizzes.len()
    }
}

fn drain_idle<H>(
    map: &mut HashMap<Uuid, Arc<H>>,
    is_idle: impl Fn(&H) -> bool,
) -> Vec<(Uuid, Arc<H>)> {
    let expired: Vec<Uuid> = map
        .iter()
        .filter(|(_, handle)| is_idle(handle))
        .map(|(id, _)| *id)
        .collect();
    expired
        .into_iter()
        .filter_map(|id| map.remove(&id).map(|handle| (id, handle)))
        .collect()
}

/// Sweep `sessions` for entries idle longer than `max_idle`, checking
/// every `max_idle` but at least once a minute.
pub fn spawn_session_sweeper(sessions: Arc<Sessions>, max_idle: Duration) -> JoinHandle<()> {
    let period = max_idle.min(MAX_SWEEP_PERIOD);
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let dropped = sessions.sweep(max_idle).await;
            if dropped > 0 {
                tracing::debug!("Session sweep dropped {} entries", dropped);
            }
        }
    })
}
