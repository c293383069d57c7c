//! Flashcard memorize session endpoints
//!
//! Every mutation runs under the session lock and then re-syncs the autoplay
//! timer, so a stopped or restarted autoplay never leaves an old timer ticking.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use vocab_core::{FlashcardSession, PracticeSettings, UpdateOutcome, VocabularyStore};

use crate::error::{ApiError, Result};
use crate::models::{
    CreateMemorizeRequest, KeyRequest, KeyResponse, MemorizeSnapshot, NavigateRequest,
    UpdateWordResponse,
};
use crate::services::sessions::MemorizeHandle;
use crate::services::speech::{SpeechQueue, Utterance};
use crate::AppState;

fn snapshot(id: Uuid, session: &FlashcardSession) -> MemorizeSnapshot {
    MemorizeSnapshot {
        id,
        progress: session.progress(),
        current_word: session.current_word().cloned(),
    }
}

fn handle(state: &AppState, id: Uuid) -> Result<Arc<MemorizeHandle>> {
    state
        .sessions
        .memorize(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Memorize session {}", id)))
}

async fn mutate<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut FlashcardSession) -> T,
) -> Result<(T, MemorizeSnapshot)> {
    let handle = handle(state, id)?;
    let mut session = handle.session.lock().await;
    let out = f(&mut session);
    handle.sync_timer(&session);
    Ok((out, snapshot(id, &session)))
}

fn validate_settings(settings: &PracticeSettings) -> Result<()> {
    if settings.tick_interval_ms == 0 {
        return Err(ApiError::BadRequest(
            "tick_interval_ms must be greater than 0".to_string(),
        ));
    }
    if settings.beats_per_word == 0 {
        return Err(ApiError::BadRequest(
            "beats_per_word must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/memorize
/// Creates a session over the words of a book/chapter selection
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateMemorizeRequest>,
) -> Result<Json<MemorizeSnapshot>> {
    let settings = payload.settings.unwrap_or_else(|| state.practice.clone());
    validate_settings(&settings)?;
    let speech = Arc::new(SpeechQueue::new());
    let store: Arc<dyn VocabularyStore> = state.store.clone();

    let mut session = FlashcardSession::new(settings, store, speech.clone());
    session.load_selection(&payload.selection);
    let progress = session.progress();
    let current_word = session.current_word().cloned();

    let id = state
        .sessions
        .insert_memorize(MemorizeHandle::new(session, speech));
    tracing::info!(
        "Created memorize session {} with {} words",
        id,
        progress.total_words
    );

    Ok(Json(MemorizeSnapshot {
        id,
        progress,
        current_word,
    }))
}

/// GET /api/memorize/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let handle = handle(&state, id)?;
    let session = handle.session.lock().await;
    Ok(Json(snapshot(id, &session)))
}

/// DELETE /api/memorize/:id
/// Stops autoplay and drops the session
pub async fn close(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    let handle = state
        .sessions
        .remove_memorize(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Memorize session {}", id)))?;
    let mut session = handle.session.lock().await;
    session.close();
    handle.cancel_timer();
    tracing::info!("Closed memorize session {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/memorize/:id/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<MemorizeSnapshot>> {
    let ((), snapshot) = mutate(&state, id, |s| s.advance(payload.direction)).await?;
    Ok(Json(snapshot))
}

/// POST /api/memorize/:id/key
/// Keyboard shortcut; unmapped keys are reported as not handled
pub async fn key(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<KeyRequest>,
) -> Result<Json<KeyResponse>> {
    let (handled, snapshot) = mutate(&state, id, |s| s.handle_key(&payload.key)).await?;
    Ok(Json(KeyResponse { handled, snapshot }))
}

/// POST /api/memorize/:id/definition
pub async fn definition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let ((), snapshot) = mutate(&state, id, |s| s.toggle_definition()).await?;
    Ok(Json(snapshot))
}

/// POST /api/memorize/:id/reset
/// Back to the first card with the definition hidden
pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let ((), snapshot) = mutate(&state, id, |s| s.reset_position()).await?;
    Ok(Json(snapshot))
}

/// POST /api/memorize/:id/filter
pub async fn filter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let ((), snapshot) = mutate(&state, id, |s| s.toggle_filter()).await?;
    Ok(Json(snapshot))
}

/// POST /api/memorize/:id/shuffle
pub async fn shuffle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let ((), snapshot) = mutate(&state, id, |s| s.toggle_shuffle()).await?;
    Ok(Json(snapshot))
}

/// POST /api/memorize/:id/autoplay
pub async fn autoplay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let (_, snapshot) = mutate(&state, id, |s| s.toggle_autoplay()).await?;
    Ok(Json(snapshot))
}

/// POST /api/memorize/:id/pronunciation
pub async fn pronunciation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemorizeSnapshot>> {
    let ((), snapshot) = mutate(&state, id, |s| s.toggle_pronunciation()).await?;
    Ok(Json(snapshot))
}

fn word_response(
    outcome: UpdateOutcome,
    word_id: &str,
    snapshot: MemorizeSnapshot,
) -> Result<Json<UpdateWordResponse>> {
    if outcome == UpdateOutcome::UnknownWord {
        return Err(ApiError::NotFound(format!("Word {}", word_id)));
    }
    Ok(Json(UpdateWordResponse { outcome, snapshot }))
}

/// POST /api/memorize/:id/words/:word_id/reviewed
/// Counts one more review of the word
pub async fn reviewed(
    State(state): State<AppState>,
    Path((id, word_id)): Path<(Uuid, String)>,
) -> Result<Json<UpdateWordResponse>> {
    let (outcome, snapshot) = mutate(&state, id, |s| s.mark_reviewed(&word_id)).await?;
    word_response(outcome, &word_id, snapshot)
}

/// POST /api/memorize/:id/words/:word_id/memorized
/// Flips the memorized flag; a store failure rolls it back
pub async fn memorized(
    State(state): State<AppState>,
    Path((id, word_id)): Path<(Uuid, String)>,
) -> Result<Json<UpdateWordResponse>> {
    let (outcome, snapshot) = mutate(&state, id, |s| s.toggle_memorized(&word_id)).await?;
    word_response(outcome, &word_id, snapshot)
}

/// GET /api/memorize/:id/utterances
/// Drains speech queued since the last call
pub async fn utterances(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Utterance>>> {
    let handle = handle(&state, id)?;
    Ok(Json(handle.speech.drain()))
}
