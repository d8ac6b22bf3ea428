//! Per-frame simulation tick
//!
//! One tick: sample control intent, apply player impulses, step the physics
//! world, then read the post-step pose to drive the camera, fall detection,
//! segment recycling, and the next round of kinematic targets. All mutation
//! of the phase and the obstacle window happens inside this single tick; a
//! skipped tick is a no-op and the simulation self-corrects on the next one.

use glam::Vec3;

use crate::config::LevelConfig;
use crate::consts::{GROUND_RAY_MAX, JUMP_IMPULSE, PLAYER_START};
use crate::distance_travelled;
use crate::highscore::HighScore;
use crate::persistence::ScoreStore;
use crate::physics::PhysicsWorld;

use super::input::{ControlIntent, EdgeDetector};
use super::level::LevelStreamer;
use super::motion::kinematic_pose;
use super::player::{ChaseCamera, PlayerController};
use super::state::{GamePhase, GameState};

/// Top-level simulation context: owns the state machine, the obstacle
/// window, the physics world, and the score. The embedding loop calls
/// [`tick`](Simulation::tick) once per display refresh and reads whatever it
/// needs for display afterwards.
pub struct Simulation {
    state: GameState,
    streamer: LevelStreamer,
    physics: PhysicsWorld,
    player: PlayerController,
    edges: EdgeDetector,
    high_score: HighScore,
    store: Box<dyn ScoreStore>,
}

impl Simulation {
    pub fn new(config: LevelConfig, store: Box<dyn ScoreStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        let streamer = LevelStreamer::new(config);
        let mut physics = PhysicsWorld::new(config);
        let state = GameState::new();
        spawn_window(&mut physics, &streamer, state.time as f32);

        Self {
            state,
            streamer,
            physics,
            player: PlayerController::new(),
            edges: EdgeDetector::new(),
            high_score,
            store,
        }
    }

    /// Advance the simulation by one tick of `dt` seconds
    pub fn tick(&mut self, intent: ControlIntent, dt: f32) {
        self.state.time += f64::from(dt);
        let edges = self.edges.sample(intent);

        // First input of any kind starts the run
        if edges.any_pressed {
            self.state.start();
        }

        // Continuous control: impulses every tick, gated on nothing
        let impulse = self.player.control_impulse(intent, dt);
        self.physics.apply_player_impulse(impulse.linear);
        self.physics.apply_player_torque_impulse(impulse.torque);

        // Jump only on the rising edge, and only when grounded
        if edges.jump_pressed
            && self
                .physics
                .ground_distance()
                .is_some_and(|d| d < GROUND_RAY_MAX)
        {
            self.physics
                .apply_player_impulse(Vec3::new(0.0, JUMP_IMPULSE, 0.0));
        }

        self.physics.step(dt);

        // Everything below reads the post-integration pose
        let Some(pos) = self.physics.player_translation() else {
            return;
        };

        self.player.camera.follow(pos);

        if self.player.has_fallen(pos) && self.state.end() {
            let score = distance_travelled(pos);
            self.high_score.submit(score, self.store.as_mut());
            log::info!(
                "run ended: distance {score:.2}, time {:.2}s",
                self.state.elapsed()
            );
        }

        let elapsed = self.state.time as f32;
        if let Some(event) = self.streamer.recycle(pos.z) {
            self.physics.despawn_segment(event.evicted_id);
            let seg = &event.spawned;
            let pose = kinematic_pose(seg.archetype, seg.base_position, seg.speed, elapsed);
            self.physics.spawn_segment(seg, pose);
        }

        // New kinematic targets, consumed by the next step
        for seg in self.streamer.segments() {
            let pose = kinematic_pose(seg.archetype, seg.base_position, seg.speed, elapsed);
            self.physics.set_obstacle_target(seg.id, pose);
        }

        self.physics.recenter_corridor(pos.z);
    }

    /// Restart command from the UI. Only meaningful while Ended: resets the
    /// player pose and velocities, regenerates the window with a fresh
    /// random sequence, and returns to Ready. The smoothed camera is
    /// deliberately left alone.
    pub fn restart(&mut self) {
        if !self.state.restart() {
            return;
        }
        self.streamer.regenerate();
        self.physics.despawn_all_segments();
        spawn_window(&mut self.physics, &self.streamer, self.state.time as f32);
        self.physics.reset_player(PLAYER_START);
    }

    /// Swap in a new level configuration, fully regenerating the window
    pub fn set_config(&mut self, config: LevelConfig) {
        if config == self.streamer.config() {
            return;
        }
        self.streamer.set_config(config);
        self.physics.despawn_all_segments();
        spawn_window(&mut self.physics, &self.streamer, self.state.time as f32);
    }

    // --- observers ---

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seconds the current (or just-finished) run has lasted
    pub fn elapsed(&self) -> f64 {
        self.state.elapsed()
    }

    /// Forward distance travelled this run, the score metric
    pub fn score(&self) -> f64 {
        self.physics
            .player_translation()
            .map(distance_travelled)
            .unwrap_or(0.0)
    }

    pub fn high_score(&self) -> f64 {
        self.high_score.best()
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.player.camera
    }

    pub fn streamer(&self) -> &LevelStreamer {
        &self.streamer
    }

    pub fn player_position(&self) -> Option<Vec3> {
        self.physics.player_translation()
    }

    pub fn player_velocity(&self) -> Option<Vec3> {
        self.physics.player_linvel()
    }

    #[cfg(test)]
    pub(crate) fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }
}

/// Create the kinematic bodies for every segment currently in the window
fn spawn_window(physics: &mut PhysicsWorld, streamer: &LevelStreamer, elapsed: f32) {
    for seg in streamer.segments() {
        let pose = kinematic_pose(seg.archetype, seg.base_position, seg.speed, elapsed);
        physics.spawn_segment(seg, pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::highscore::HIGH_SCORE_KEY;
    use crate::persistence::MemoryStore;

    fn sim() -> Simulation {
        Simulation::new(LevelConfig::default(), Box::new(MemoryStore::new()))
    }

    fn forward() -> ControlIntent {
        ControlIntent { forward: true, ..Default::default() }
    }

    #[test]
    fn test_new_sim_is_ready() {
        let s = sim();
        assert_eq!(s.phase(), GamePhase::Ready);
        assert_eq!(s.score(), 0.0);
        assert_eq!(s.high_score(), 0.0);
        assert_eq!(s.streamer().len(), 15);
    }

    #[test]
    fn test_first_input_starts_run() {
        let mut s = sim();
        s.tick(ControlIntent::default(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Ready);

        s.tick(forward(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert!(s.state().start_time.is_some());
    }

    #[test]
    fn test_player_advances_under_forward_input() {
        let mut s = sim();
        for _ in 0..300 {
            s.tick(forward(), SIM_DT);
        }
        let pos = s.player_position().unwrap();
        assert!(pos.z < PLAYER_START.z);
        assert!(s.score() > 0.0);
    }

    #[test]
    fn test_fall_ends_run_and_persists_high_score() {
        let mut s = sim();
        s.tick(forward(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Playing);

        // Force the fall: drop the body well below the threshold
        s.physics_mut().set_player_translation(Vec3::new(0.0, -10.0, -6.0));
        s.tick(ControlIntent::default(), SIM_DT);

        assert_eq!(s.phase(), GamePhase::Ended);
        assert!(s.state().end_time.is_some());
        // Distance 8 - (-6) = 14 units, recorded as the high score
        assert!(s.high_score() > 0.0);
        assert_eq!(s.store.get(HIGH_SCORE_KEY), Some(s.high_score()));

        // Further ticks while Ended stay Ended
        let end_time = s.state().end_time;
        s.tick(ControlIntent::default(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Ended);
        assert_eq!(s.state().end_time, end_time);
    }

    #[test]
    fn test_restart_resets_player_and_window() {
        let mut s = sim();
        s.tick(forward(), SIM_DT);
        s.physics_mut().set_player_translation(Vec3::new(0.0, -10.0, -6.0));
        s.tick(ControlIntent::default(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Ended);

        s.restart();
        assert_eq!(s.phase(), GamePhase::Ready);
        assert_eq!(s.state().start_time, None);
        assert_eq!(s.state().end_time, None);
        assert_eq!(s.streamer().len(), 15);
        let ids: Vec<u64> = s.streamer().segments().map(|seg| seg.id).collect();
        assert_eq!(ids, (0..15).collect::<Vec<u64>>());

        let pos = s.player_position().unwrap();
        assert_eq!(pos, PLAYER_START);
        // One settling tick with no input: still near the spawn, velocities were zeroed
        s.tick(ControlIntent::default(), SIM_DT);
        let pos = s.player_position().unwrap();
        assert!((pos.z - PLAYER_START.z).abs() < 1e-3);
    }

    #[test]
    fn test_held_jump_applies_single_impulse() {
        let mut s = sim();
        // Settle onto the start platform
        for _ in 0..120 {
            s.tick(ControlIntent::default(), SIM_DT);
        }
        assert!(s.player_velocity().unwrap().y.abs() < 0.1);

        // Press and hold: the grounded impulse fires on the rising edge
        let jump = ControlIntent { jump: true, ..Default::default() };
        s.tick(jump, SIM_DT);
        let launch_vy = s.player_velocity().unwrap().y;
        assert!(launch_vy > 1.0, "jump did not launch: vy {launch_vy}");

        // Held through the whole arc and the landing: no second boost, even
        // on the later ticks where the ball is grounded again
        let mut peak_vy = launch_vy;
        for _ in 0..240 {
            s.tick(jump, SIM_DT);
            peak_vy = peak_vy.max(s.player_velocity().unwrap().y);
        }
        assert!(
            peak_vy <= launch_vy + 0.1,
            "second impulse while held: peak {peak_vy} vs launch {launch_vy}"
        );

        // Release, settle, press again: a fresh rising edge fires once more
        for _ in 0..120 {
            s.tick(ControlIntent::default(), SIM_DT);
        }
        s.tick(jump, SIM_DT);
        assert!(s.player_velocity().unwrap().y > 1.0);
    }

    #[test]
    fn test_restart_is_noop_unless_ended() {
        let mut s = sim();
        s.restart();
        assert_eq!(s.phase(), GamePhase::Ready);
        s.tick(forward(), SIM_DT);
        s.restart();
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_high_score_not_lowered_by_worse_run() {
        let mut s = sim();
        // First run: fall far down the corridor
        s.tick(forward(), SIM_DT);
        s.physics_mut().set_player_translation(Vec3::new(0.0, -10.0, -20.0));
        s.tick(ControlIntent::default(), SIM_DT);
        let best = s.high_score();
        assert!(best >= 28.0);

        // Second run: fall immediately
        s.restart();
        s.tick(forward(), SIM_DT);
        s.physics_mut().set_player_translation(Vec3::new(0.0, -10.0, 7.0));
        s.tick(ControlIntent::default(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Ended);
        assert_eq!(s.high_score(), best);
    }

    #[test]
    fn test_recycle_swaps_physics_bodies() {
        let mut s = sim();
        s.tick(forward(), SIM_DT);
        // Teleport past the front segment's threshold
        s.physics_mut().set_player_translation(Vec3::new(0.0, 1.0, -0.5));
        s.tick(forward(), SIM_DT);

        let ids: Vec<u64> = s.streamer().segments().map(|seg| seg.id).collect();
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&15));
        assert_eq!(s.streamer().len(), 15);
        assert_eq!(s.physics_mut().active_obstacles(), 15);
    }

    #[test]
    fn test_window_survives_long_run() {
        let mut s = sim();
        s.tick(forward(), SIM_DT);
        for i in 0..200 {
            let z = -(i as f32) * 2.0;
            s.physics_mut().set_player_translation(Vec3::new(0.0, 1.0, z));
            s.tick(forward(), SIM_DT);
            assert_eq!(s.streamer().len(), 15);
        }
    }
}
