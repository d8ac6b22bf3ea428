//! Browser bindings
//!
//! Exports the simulation to the host page: the frame loop constructs a
//! [`Game`], feeds it the key-state table once per display refresh, and
//! reads phase/score/camera for display. The high score persists through
//! LocalStorage.

use wasm_bindgen::prelude::*;

use crate::config::LevelConfig;
use crate::consts::SIM_DT;
use crate::persistence::LocalStorageStore;
use crate::sim::{ControlIntent, GamePhase, Simulation};

/// A running game instance
#[wasm_bindgen]
pub struct Game {
    sim: Simulation,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new(count: usize, seed: u64) -> Game {
        Game {
            sim: Simulation::new(
                LevelConfig::new(count, seed),
                Box::new(LocalStorageStore::new()),
            ),
        }
    }

    /// Advance one frame. A non-positive `dt` falls back to the fixed step.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        forward: bool,
        backward: bool,
        left: bool,
        right: bool,
        jump: bool,
        dt: f32,
    ) {
        let intent = ControlIntent { forward, backward, left, right, jump };
        let dt = if dt > 0.0 { dt } else { SIM_DT };
        self.sim.tick(intent, dt);
    }

    /// Restart command from the UI; only meaningful while ended
    pub fn restart(&mut self) {
        self.sim.restart();
    }

    pub fn phase(&self) -> String {
        match self.sim.phase() {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
        }
        .to_string()
    }

    /// Forward distance travelled this run
    pub fn score(&self) -> f64 {
        self.sim.score()
    }

    pub fn high_score(&self) -> f64 {
        self.sim.high_score()
    }

    /// Seconds the current (or just-finished) run has lasted
    pub fn elapsed(&self) -> f64 {
        self.sim.elapsed()
    }

    /// Smoothed camera as [pos.x, pos.y, pos.z, target.x, target.y, target.z]
    pub fn camera(&self) -> Vec<f32> {
        let cam = self.sim.camera();
        vec![
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
        ]
    }

    /// Player ball translation as [x, y, z]; empty until physics is ready
    pub fn player_position(&self) -> Vec<f32> {
        self.sim
            .player_position()
            .map(|p| vec![p.x, p.y, p.z])
            .unwrap_or_default()
    }
}
