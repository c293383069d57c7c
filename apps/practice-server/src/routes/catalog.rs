//! Book, chapter and word listing endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use vocab_core::VocabularyStore;

use crate::error::Result;
use crate::models::{
    BookListResponse, ChapterListResponse, WordListResponse, WordsByChaptersRequest,
};
use crate::AppState;

/// GET /api/books
pub async fn books(State(state): State<AppState>) -> Result<Json<BookListResponse>> {
    let books = state.store.list_books()?;
    Ok(Json(BookListResponse { books }))
}

/// GET /api/books/:book/chapters
/// Chapters ordered by the number in their name
pub async fn chapters(
    State(state): State<AppState>,
    Path(book): Path<String>,
) -> Result<Json<ChapterListResponse>> {
    let chapters = state.store.list_chapters(&book)?;
    Ok(Json(ChapterListResponse { chapters }))
}

/// GET /api/books/:book/words
pub async fn book_words(
    State(state): State<AppState>,
    Path(book): Path<String>,
) -> Result<Json<WordListResponse>> {
    let words = state.store.list_words_by_book(&book)?;
    Ok(Json(WordListResponse { words }))
}

/// POST /api/words/by-chapters
pub async fn chapter_words(
    State(state): State<AppState>,
    Json(payload): Json<WordsByChaptersRequest>,
) -> Result<Json<WordListResponse>> {
    let words = state.store.list_words_by_chapters(&payload.chapter_ids)?;
    Ok(Json(WordListResponse { words }))
}
