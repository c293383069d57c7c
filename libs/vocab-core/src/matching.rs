//! Answer checking for quiz questions.

use crate::types::AnswerMode;

/// Whether `given` answers a question whose answer is `correct`.
///
/// Multiple choice needs an exact match. Typed answers are lenient: after
/// trimming and lower-casing, either side containing the other counts. A blank
/// typed answer is never correct.
pub fn compare_answers(given: &str, correct: &str, mode: AnswerMode) -> bool {
    match mode {
        AnswerMode::MultipleChoice => given == correct,
        AnswerMode::TextInput => {
            let given = normalize(given);
            let correct = normalize(correct);
            !given.is_empty() && (correct.contains(&given) || given.contains(&correct))
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
