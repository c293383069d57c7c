//! Quiz generation and play.

pub mod generator;
pub mod runner;

use serde::{Deserialize, Serialize};

use crate::types::{AnswerMode, Orientation};

/// A generated quiz question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub word_id: String,
    pub prompt: String,
    pub correct_answer: String,
    /// Candidate answers, present only for multiple choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub orientation: Orientation,
    pub answer_mode: AnswerMode,
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub question: Question,
    /// Empty when the countdown ran out.
    pub answer: String,
    pub is_correct: bool,
    pub time_spent_secs: u32,
}

pub use generator::{generate, generate_with};
pub use runner::{QuizPhase, QuizProgress, QuizRunner, QuizSummary};
