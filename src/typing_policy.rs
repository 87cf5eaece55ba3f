/// In-progress state of the slot being typed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotFeedback {
    /// what has been typed so far is a prefix of the expected word
    Partial,
    Mismatch,
}

/// Final mark of a slot once its word has been submitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Exact, case-insensitive comparison of a submitted word; surrounding
/// whitespace in the input is ignored.
pub fn validate_user_input(input: &str, expected: &str) -> bool {
    normalize(input) == expected.to_lowercase()
}

/// Feedback for a word that has not been submitted yet.
pub fn slot_feedback(input: &str, expected: &str) -> SlotFeedback {
    if expected.to_lowercase().starts_with(&normalize(input)) {
        SlotFeedback::Partial
    } else {
        SlotFeedback::Mismatch
    }
}

pub fn outcome_for(input: &str, expected: &str) -> Outcome {
    if validate_user_input(input, expected) {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}
