//! Quiz endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use vocab_core::{generate, load_words, QuizRunner, QuizSummary};

use crate::error::{ApiError, Result};
use crate::models::{AnswerRequest, AnswerResponse, CreateQuizRequest, QuestionView, QuizSnapshot};
use crate::services::sessions::QuizHandle;
use crate::AppState;

fn snapshot(id: Uuid, runner: &QuizRunner) -> QuizSnapshot {
    QuizSnapshot {
        id,
        progress: runner.progress(),
        current_question: runner.current_question().map(QuestionView::from),
    }
}

fn handle(state: &AppState, id: Uuid) -> Result<Arc<QuizHandle>> {
    state
        .sessions
        .quiz(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Quiz {}", id)))
}

/// POST /api/quiz
/// Generates questions from a selection; needs at least two words
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<Json<QuizSnapshot>> {
    let settings = payload.settings;
    if settings.total_questions == 0 {
        return Err(ApiError::BadRequest(
            "total_questions must be at least 1".to_string(),
        ));
    }
    let words = load_words(state.store.as_ref(), &payload.selection);
    let count = settings.available_questions(words.len());
    let questions = generate(&words, count, settings.orientation, settings.answer_mode);
    if questions.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Not enough words for a quiz ({} selected)",
            words.len()
        )));
    }

    let runner = QuizRunner::new(questions, settings.time_limit_secs);
    let view = snapshot(Uuid::nil(), &runner);
    let id = state.sessions.insert_quiz(QuizHandle::new(runner));
    tracing::info!(
        "Created quiz {} with {} questions",
        id,
        view.progress.total_questions
    );

    Ok(Json(QuizSnapshot { id, ..view }))
}

/// GET /api/quiz/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizSnapshot>> {
    let handle = handle(&state, id)?;
    let runner = handle.runner.lock().await;
    Ok(Json(snapshot(id, &runner)))
}

/// POST /api/quiz/:id/start
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizSnapshot>> {
    let handle = handle(&state, id)?;
    let mut runner = handle.runner.lock().await;
    if !runner.start() {
        return Err(ApiError::Conflict(format!("Quiz {} already started", id)));
    }
    handle.sync_timer(&runner);
    Ok(Json(snapshot(id, &runner)))
}

/// POST /api/quiz/:id/answer
/// Records an answer for the current question and moves on
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let handle = handle(&state, id)?;
    let mut runner = handle.runner.lock().await;
    let result = runner
        .submit_answer(&payload.answer)
        .cloned()
        .ok_or_else(|| ApiError::Conflict(format!("Quiz {} is not in progress", id)))?;
    handle.sync_timer(&runner);

    Ok(Json(AnswerResponse {
        result,
        snapshot: snapshot(id, &runner),
    }))
}

/// GET /api/quiz/:id/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizSummary>> {
    let handle = handle(&state, id)?;
    let runner = handle.runner.lock().await;
    Ok(Json(runner.summary()))
}

/// DELETE /api/quiz/:id
pub async fn close(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    let handle = state
        .sessions
        .remove_quiz(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Quiz {}", id)))?;
    handle.cancel_timer();
    tracing::info!("Closed quiz {}", id);
    Ok(StatusCode::NO_CONTENT)
}
