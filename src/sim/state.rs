//! Game phase machine
//!
//! A single round moves `Ready -> Playing -> Ended -> Ready`. Transitions are
//! total functions of the current phase and event: an event irrelevant to the
//! current phase is a no-op, never an error. Only the simulation tick mutates
//! the phase; observers may read it freely.

use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting on the start platform for the first input
    #[default]
    Ready,
    /// Active run
    Playing,
    /// Run over (player fell); waiting for restart
    Ended,
}

/// Phase plus the timestamps scoring needs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct GameState {
    pub phase: GamePhase,
    /// Accumulated simulation time in seconds
    pub time: f64,
    /// Set on Ready -> Playing, cleared on restart
    pub start_time: Option<f64>,
    /// Set on Playing -> Ended, cleared on restart
    pub end_time: Option<f64>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// First input of any kind: Ready -> Playing. No-op in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.start_time = Some(self.time);
        log::debug!("phase: Ready -> Playing at t={:.2}", self.time);
        true
    }

    /// Player fell: Playing -> Ended. Returns whether the transition fired,
    /// so the one-shot high-score flush can key off it. Idempotent while
    /// already Ended.
    pub fn end(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Ended;
        self.end_time = Some(self.time);
        log::debug!("phase: Playing -> Ended at t={:.2}", self.time);
        true
    }

    /// Explicit restart command: Ended -> Ready, timestamps cleared.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }
        self.phase = GamePhase::Ready;
        self.start_time = None;
        self.end_time = None;
        log::debug!("phase: Ended -> Ready at t={:.2}", self.time);
        true
    }

    /// Seconds the current (or just-finished) run has lasted
    pub fn elapsed(&self) -> f64 {
        match (self.phase, self.start_time) {
            (GamePhase::Playing, Some(start)) => self.time - start,
            (GamePhase::Ended, Some(start)) => self.end_time.unwrap_or(self.time) - start,
            _ => 0.0,
        }
    }
}
