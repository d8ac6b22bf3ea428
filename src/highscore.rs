//! High score tracking
//!
//! A single non-negative scalar: the furthest distance travelled in any run.
//! Loaded once at startup, monotonically updated, flushed to the store only
//! on the Playing→Ended transition.

use crate::persistence::ScoreStore;

/// Storage key for the high score scalar
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Best distance travelled across all runs
#[derive(Debug, Clone, Copy, Default)]
pub struct HighScore {
    best: f64,
}

impl HighScore {
    /// Load the stored high score, defaulting to zero
    pub fn load(store: &dyn ScoreStore) -> Self {
        let best = store.get(HIGH_SCORE_KEY).unwrap_or(0.0).max(0.0);
        log::info!("loaded high score: {best:.2}");
        Self { best }
    }

    /// Current best
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Submit a finished run's score. Writes through to the store only when
    /// the score beats the current best; returns whether it did.
    pub fn submit(&mut self, score: f64, store: &mut dyn ScoreStore) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        store.set(HIGH_SCORE_KEY, score);
        log::info!("new high score: {score:.2}");
        true
    }
}
