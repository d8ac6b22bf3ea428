//! Roll On - an endless-runner obstacle course
//!
//! A physics-driven ball rolls down a procedurally extended corridor of
//! moving hazards; survive as far as possible.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, level streaming, motion laws, player control)
//! - `physics`: rapier3d rigid-body world wrapper
//! - `persistence`: Key-value storage for the high score
//! - `config`: Level configuration (seed, segment count)
//! - `wasm` (wasm32 only): bindings for the browser frame loop

pub mod config;
pub mod highscore;
pub mod persistence;
pub mod physics;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::LevelConfig;
pub use highscore::HighScore;
pub use sim::{ControlIntent, GamePhase, Simulation};

use glam::Vec3;

/// Game tuning constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Impulse strength per second of held input
    pub const IMPULSE_STRENGTH: f32 = 1.0;
    /// Torque impulse strength per second of held input
    pub const TORQUE_STRENGTH: f32 = 1.0;
    /// Upward impulse applied on a grounded jump
    pub const JUMP_IMPULSE: f32 = 0.5;
    /// Ground ray starts this far below the body center
    pub const GROUND_RAY_OFFSET: f32 = 0.31;
    /// Maximum ground ray length; a hit closer than this counts as grounded
    pub const GROUND_RAY_MAX: f32 = 0.1;
    /// Falling below this Y ends the run
    pub const FALL_Y_THRESHOLD: f32 = -4.0;

    /// Player ball spawn pose, on the start platform
    pub const PLAYER_START: Vec3 = Vec3::new(0.0, 1.0, 8.0);
    /// Player ball collider radius
    pub const PLAYER_RADIUS: f32 = 0.3;

    /// Longitudinal spacing between obstacle segments
    pub const SEGMENT_SPACING: f32 = 4.0;
    /// Z position of the first segment, adjacent to the start platform
    pub const FIRST_SEGMENT_Z: f32 = 4.0;
    /// Segment floor half-width (corridor is 4 units wide)
    pub const SEGMENT_HALF_WIDTH: f32 = 2.0;

    /// Camera smoothing factor, applied per tick (deliberately not
    /// delta-scaled; changing this alters the camera feel)
    pub const CAMERA_LERP: f32 = 0.1;
    /// Camera position ideal, relative to the player body
    pub const CAMERA_POS_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 2.25);
    /// Camera look-at ideal, relative to the player body
    pub const CAMERA_TARGET_OFFSET: Vec3 = Vec3::new(0.0, 0.25, 0.0);

    /// World gravity
    pub const GRAVITY_Y: f32 = -9.81;
}

/// Forward distance travelled from the start platform, the score metric.
/// Never negative: rolling backwards off the platform scores zero.
#[inline]
pub fn distance_travelled(player_pos: Vec3) -> f64 {
    f64::from((consts::PLAYER_START.z - player_pos.z).max(0.0))
}
