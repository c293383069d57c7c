//! Quiz play: countdown, answer evaluation and scoring.

use serde::Serialize;

use super::{Question, QuizResult};
use crate::matching::compare_answers;

/// Seconds left at which the countdown is flagged as urgent.
pub const WARNING_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub phase: QuizPhase,
    /// 1-based number of the current question.
    pub question_number: usize,
    pub total_questions: usize,
    pub time_limit_secs: u32,
    pub time_left_secs: u32,
    pub warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub score: u32,
    pub correct: usize,
    pub incorrect: usize,
    pub average_time_secs: u32,
    pub results: Vec<QuizResult>,
}

/// Plays a fixed list of questions. Restarting means building a new runner
/// from freshly generated questions.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    questions: Vec<Question>,
    phase: QuizPhase,
    current: usize,
    results: Vec<QuizResult>,
    time_limit: u32,
    time_left: u32,
    elapsed: u32,
}

impl QuizRunner {
    /// `time_limit_secs` of zero disables the countdown.
    pub fn new(questions: Vec<Question>, time_limit_secs: u32) -> Self {
        Self {
            questions,
            phase: QuizPhase::NotStarted,
            current: 0,
            results: Vec::new(),
            time_limit: time_limit_secs,
            time_left: time_limit_secs,
            elapsed: 0,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::InProgress => self.questions.get(self.current),
            _ => None,
        }
    }

    /// Begin the quiz. False if already started or there are no questions.
    pub fn start(&mut self) -> bool {
        if self.phase != QuizPhase::NotStarted || self.questions.is_empty() {
            return false;
        }
        self.phase = QuizPhase::InProgress;
        self.reset_timer();
        tracing::debug!("Quiz started with {} questions", self.questions.len());
        true
    }

    /// One second of countdown. Running out submits an empty answer.
    /// Returns the result recorded by a timeout, if any.
    pub fn tick(&mut self) -> Option<&QuizResult> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        self.elapsed += 1;
        if self.time_limit == 0 {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return self.submit_answer("");
        }
        None
    }

    /// Record an answer for the current question and move on.
    pub fn submit_answer(&mut self, answer: &str) -> Option<&QuizResult> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        let question = self.questions.get(self.current)?.clone();
        let is_correct = compare_answers(answer, &question.correct_answer, question.answer_mode);
        let time_spent_secs = if self.time_limit > 0 {
            self.time_limit - self.time_left
        } else {
            self.elapsed
        };

        self.results.push(QuizResult {
            question,
            answer: answer.to_string(),
            is_correct,
            time_spent_secs,
        });

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.reset_timer();
        } else {
            self.phase = QuizPhase::Completed;
            tracing::debug!("Quiz completed, score {}", self.score());
        }
        self.results.last()
    }

    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            phase: self.phase,
            question_number: match self.phase {
                QuizPhase::NotStarted => 0,
                QuizPhase::InProgress => self.current + 1,
                QuizPhase::Completed => self.questions.len(),
            },
            total_questions: self.questions.len(),
            time_limit_secs: self.time_limit,
            time_left_secs: self.time_left,
            warning: self.phase == QuizPhase::InProgress
                && self.time_limit > 0
                && self.time_left <= WARNING_SECS,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    /// Percentage of all questions answered correctly, rounded.
    pub fn score(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        (100.0 * self.correct_count() as f64 / self.questions.len() as f64).round() as u32
    }

    /// Mean seconds per answered question, rounded.
    pub fn average_time(&self) -> u32 {
        if self.results.is_empty() {
            return 0;
        }
        let total: u32 = self.results.iter().map(|r| r.time_spent_secs).sum();
        (total as f64 / self.results.len() as f64).round() as u32
    }

    pub fn summary(&self) -> QuizSummary {
        let correct = self.correct_count();
        QuizSummary {
            score: self.score(),
            correct,
            incorrect: self.results.len() - correct,
            average_time_secs: self.average_time(),
            results: self.results.clone(),
        }
    }

    fn reset_timer(&mut self) {
        self.time_left = self.time_limit;
        self.elapsed = 0;
    }
}
