//! Level configuration
//!
//! Changing either field fully regenerates the obstacle window.

use serde::{Deserialize, Serialize};

/// Procedural level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Number of simultaneously active obstacle segments
    pub count: usize,
    /// Seed for the segment archetype/speed draws
    pub seed: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { count: 15, seed: 0 }
    }
}

impl LevelConfig {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }
}
