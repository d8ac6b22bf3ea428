//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (level streaming is reproducible from its seed)
//! - Stable segment ordering (window front = oldest/nearest)
//! - No rendering or platform dependencies; the physics world is driven
//!   through the wrapper in [`crate::physics`]

pub mod input;
pub mod level;
pub mod motion;
pub mod player;
pub mod state;
pub mod tick;

pub use input::{ControlIntent, EdgeDetector, IntentEdges};
pub use level::{LevelStreamer, ObstacleArchetype, ObstacleSegment, RecycleEvent};
pub use motion::{Pose, kinematic_pose};
pub use player::{ChaseCamera, PlayerController};
pub use state::{GamePhase, GameState};
pub use tick::Simulation;
