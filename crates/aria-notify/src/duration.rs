//! Duration estimation
//!
//! Maps message text to an estimated spoken duration so the scheduler knows
//! when it is safe to advance without cutting off the current announcement.
//! Purely a heuristic: ~4 words/sec spoken, ~2 words/sec for braille.

use std::time::Duration;

/// Default per-word reading time
pub const WORD_DURATION: Duration = Duration::from_millis(500);

/// Spoken-duration estimator
#[derive(Debug, Clone, Copy)]
pub struct DurationEstimator {
    /// Reading time per whitespace-separated token
    pub per_word: Duration,
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self {
            per_word: WORD_DURATION,
        }
    }
}

impl DurationEstimator {
    pub fn new(per_word: Duration) -> Self {
        Self { per_word }
    }

    /// Estimate how long assistive technology needs for `text`.
    ///
    /// Empty text still counts as one token so a "clear" announcement never
    /// produces a zero-length wait.
    pub fn estimate(&self, text: &str) -> Duration {
        let words = text.split_whitespace().count().max(1) as u32;
        self.per_word * words
    }
}
