use crate::error::{Error, Result};

/// Words per minute: `(word_count / elapsed_secs) * 60`.
pub fn calculate_wpm(word_count: u32, elapsed_secs: u64) -> Result<f64> {
    if elapsed_secs == 0 {
        return Err(Error::invalid(
            "elapsed_secs",
            "elapsed time must be a positive number of seconds",
        ));
    }
    Ok((word_count as f64 / elapsed_secs as f64) * 60.0)
}

/// Percentage of submitted words that were correct, 0 when nothing was submitted.
pub fn accuracy(correct: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    ((correct as f64 / attempted as f64) * 100.0).round()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionResults {
    pub correct_words: u32,
    pub attempted_words: u32,
    pub elapsed_secs: u64,
    pub wpm: f64,
    pub accuracy: f64,
}

impl SessionResults {
    pub fn compute(correct_words: u32, attempted_words: u32, elapsed_secs: u64) -> Result<Self> {
        Ok(Self {
            correct_words,
            attempted_words,
            elapsed_secs,
            wpm: calculate_wpm(correct_words, elapsed_secs)?,
            accuracy: accuracy(correct_words, attempted_words),
        })
    }
}
