//! Infinite-streaming level generation
//!
//! The corridor is effectively infinite but only a fixed-size window of
//! obstacle segments exists at any time. When the player has passed the
//! oldest segment by one full segment length, it is evicted and a fresh
//! segment is appended one spacing beyond the current last one: an
//! O(1)-amortized sliding window, O(window) memory.

use std::collections::VecDeque;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::consts::{FIRST_SEGMENT_Z, SEGMENT_SPACING};

/// Obstacle archetypes, one motion law each (see [`super::motion`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleArchetype {
    /// Bar rotating about the vertical axis
    Spinner,
    /// Bar oscillating vertically
    Limbo,
    /// Blade oscillating laterally
    Axe,
    /// Slab bouncing off the floor
    Crusher,
    /// Column swinging laterally, 1.5x amplitude
    Pendulum,
    /// Wall sweeping laterally, 1.5x amplitude
    Pusher,
}

/// All archetypes, in draw order
pub const ARCHETYPES: [ObstacleArchetype; 6] = [
    ObstacleArchetype::Spinner,
    ObstacleArchetype::Limbo,
    ObstacleArchetype::Axe,
    ObstacleArchetype::Crusher,
    ObstacleArchetype::Pendulum,
    ObstacleArchetype::Pusher,
];

impl ObstacleArchetype {
    /// Draw a motion speed for a new instance. Drawn once at segment
    /// creation and fixed for the segment's lifetime; the ranges match the
    /// per-archetype feel (bars may spin either way, crushers and pendulums
    /// only make sense one way).
    fn draw_speed(self, rng: &mut Pcg32) -> f32 {
        match self {
            Self::Spinner | Self::Limbo | Self::Axe => {
                let magnitude = rng.random_range(1.0..2.0);
                if rng.random_bool(0.5) { -magnitude } else { magnitude }
            }
            Self::Pendulum => rng.random_range(0.5..1.5),
            Self::Crusher => rng.random_range(0.8..1.8),
            Self::Pusher => rng.random_range(1.0..2.0),
        }
    }

    fn draw(rng: &mut Pcg32) -> Self {
        ARCHETYPES[rng.random_range(0..ARCHETYPES.len())]
    }
}

/// One active stretch of corridor: a floor tile plus one kinematic hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSegment {
    /// Monotonically increasing; strictly +1 on every recycle
    pub id: u64,
    pub archetype: ObstacleArchetype,
    /// Center of the segment floor
    pub base_position: Vec3,
    /// Motion speed, immutable for this instance's lifetime
    pub speed: f32,
}

/// Emitted by a recycle so the physics layer can swap bodies
#[derive(Debug, Clone)]
pub struct RecycleEvent {
    pub evicted_id: u64,
    pub spawned: ObstacleSegment,
}

/// Owns the sliding window of obstacle segments
#[derive(Debug, Clone)]
pub struct LevelStreamer {
    config: LevelConfig,
    rng: Pcg32,
    window: VecDeque<ObstacleSegment>,
    next_id: u64,
}

impl LevelStreamer {
    pub fn new(config: LevelConfig) -> Self {
        let mut streamer = Self {
            config,
            rng: Pcg32::seed_from_u64(config.seed),
            window: VecDeque::with_capacity(config.count),
            next_id: 0,
        };
        streamer.fill_window();
        streamer
    }

    /// Rebuild the window with fresh draws from the ongoing RNG stream.
    /// Used on restart: a new random sequence, still reproducible from the
    /// original seed.
    pub fn regenerate(&mut self) {
        self.fill_window();
    }

    /// Apply a new configuration. A changed seed or count reseeds the RNG
    /// and fully regenerates the window; an identical config is a no-op.
    pub fn set_config(&mut self, config: LevelConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.rng = Pcg32::seed_from_u64(config.seed);
        self.fill_window();
    }

    fn fill_window(&mut self) {
        self.window.clear();
        self.next_id = 0;
        for i in 0..self.config.count {
            let z = FIRST_SEGMENT_Z - SEGMENT_SPACING * i as f32;
            let segment = self.fresh_segment(Vec3::new(0.0, 0.0, z));
            self.window.push_back(segment);
        }
        log::debug!(
            "level window regenerated: {} segments, seed {}",
            self.config.count,
            self.config.seed
        );
    }

    fn fresh_segment(&mut self, base_position: Vec3) -> ObstacleSegment {
        let id = self.next_id;
        self.next_id += 1;
        let archetype = ObstacleArchetype::draw(&mut self.rng);
        let speed = archetype.draw_speed(&mut self.rng);
        ObstacleSegment { id, archetype, base_position, speed }
    }

    /// Evaluate the recycling rule for the player's current longitudinal
    /// position. Recycles at most one segment per call; returns the swap the
    /// physics layer must mirror, or `None` when the player has not yet
    /// passed the front segment by a full segment length.
    pub fn recycle(&mut self, player_z: f32) -> Option<RecycleEvent> {
        let front_z = self.window.front().map(|s| s.base_position.z);
        let Some(front_z) = front_z else {
            // Empty window: invariant violation, skip rather than fault
            debug_assert!(false, "recycle on empty window");
            return None;
        };
        if player_z >= front_z - SEGMENT_SPACING {
            return None;
        }

        // The unwraps above guarantee non-empty; re-check defensively anyway
        let evicted = self.window.pop_front()?;
        let last_z = self
            .window
            .back()
            .map(|s| s.base_position.z)
            .unwrap_or(front_z);
        let spawned = self.fresh_segment(Vec3::new(0.0, 0.0, last_z - SEGMENT_SPACING));
        self.window.push_back(spawned.clone());

        log::debug!(
            "recycled segment {} -> {} at z={:.1}",
            evicted.id,
            spawned.id,
            spawned.base_position.z
        );
        Some(RecycleEvent { evicted_id: evicted.id, spawned })
    }

    /// Active segments, front = oldest/nearest to the start
    pub fn segments(&self) -> impl Iterator<Item = &ObstacleSegment> {
        self.window.iter()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn config(&self) -> LevelConfig {
        self.config
    }
}
