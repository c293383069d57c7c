//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by the vocabulary store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("word not found: {0}")]
    WordNotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}
