//! rapier3d world wrapper
//!
//! The simulation consumes a narrow contract: apply impulse/torque to the
//! player ball, set kinematic targets for hazards, set/read translations, and
//! a short downward raycast for ground checks. Everything rapier-specific
//! (sets, pipelines, nalgebra types) stays behind this module; the sim side
//! speaks `glam`.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use rapier3d::na::UnitQuaternion;
use rapier3d::prelude::*;

use crate::config::LevelConfig;
use crate::consts::{
    GRAVITY_Y, GROUND_RAY_MAX, GROUND_RAY_OFFSET, PLAYER_RADIUS, PLAYER_START, SEGMENT_HALF_WIDTH,
};
use crate::sim::level::{ObstacleArchetype, ObstacleSegment};
use crate::sim::motion::Pose;

#[inline]
fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn from_na(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
fn to_na_quat(q: Quat) -> UnitQuaternion<Real> {
    UnitQuaternion::from_quaternion(rapier3d::na::Quaternion::new(q.w, q.x, q.y, q.z))
}

/// Hazard collider half-extents per archetype
fn hazard_half_extents(archetype: ObstacleArchetype) -> (f32, f32, f32) {
    match archetype {
        // 3.5 x 0.3 x 0.3 bar
        ObstacleArchetype::Spinner | ObstacleArchetype::Limbo => (1.75, 0.15, 0.15),
        // 1.5 x 1.5 x 0.3 blade
        ObstacleArchetype::Axe => (0.75, 0.75, 0.15),
        // 0.5 x 2 x 0.5 column
        ObstacleArchetype::Pendulum => (0.25, 1.0, 0.25),
        // 2 x 0.5 x 2 slab
        ObstacleArchetype::Crusher => (1.0, 0.25, 1.0),
        // 0.5 x 1 x 3 wall
        ObstacleArchetype::Pusher => (0.25, 0.5, 1.5),
    }
}

/// Owns the rapier world: one dynamic player ball, one kinematic body per
/// active segment, and a fixed "corridor" body carrying the floor strip and
/// lateral walls that is re-centered on the player every tick.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    player: RigidBodyHandle,
    corridor: RigidBodyHandle,
    /// Segment id -> kinematic hazard body
    obstacles: HashMap<u64, RigidBodyHandle>,
}

impl PhysicsWorld {
    pub fn new(config: LevelConfig) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        let player_body = RigidBodyBuilder::dynamic()
            .translation(to_na(PLAYER_START))
            .linear_damping(0.5)
            .angular_damping(0.5)
            .ccd_enabled(true)
            .build();
        let player = bodies.insert(player_body);
        colliders.insert_with_parent(
            ColliderBuilder::ball(PLAYER_RADIUS)
                .friction(1.0)
                .restitution(0.2)
                .build(),
            player,
            &mut bodies,
        );

        let corridor = bodies.insert(RigidBodyBuilder::fixed().build());
        let half_length = 2.0 * config.count as f32 + 4.0;
        let z_offset = -(2.0 * config.count as f32) + 6.0;
        // Floor strip under the whole window plus the start platform
        colliders.insert_with_parent(
            ColliderBuilder::cuboid(SEGMENT_HALF_WIDTH, 0.1, half_length)
                .translation(vector![0.0, -0.1, z_offset])
                .friction(1.0)
                .restitution(0.2)
                .build(),
            corridor,
            &mut bodies,
        );
        // Lateral walls bounding sideways movement
        for x in [-2.15, 2.15] {
            colliders.insert_with_parent(
                ColliderBuilder::cuboid(0.15, 0.75, half_length)
                    .translation(vector![x, 0.75, z_offset])
                    .restitution(0.2)
                    .build(),
                corridor,
                &mut bodies,
            );
        }

        let mut world = Self {
            gravity: vector![0.0, GRAVITY_Y, 0.0],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            player,
            corridor,
            obstacles: HashMap::new(),
        };
        world.query_pipeline.update(&world.colliders);
        world
    }

    /// Step the world by `dt`. Kinematic targets set since the previous step
    /// take effect here.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    // --- player ball ---

    pub fn apply_player_impulse(&mut self, impulse: Vec3) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.apply_impulse(to_na(impulse), true);
        }
    }

    pub fn apply_player_torque_impulse(&mut self, torque: Vec3) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.apply_torque_impulse(to_na(torque), true);
        }
    }

    /// Current player translation; `None` until the body exists (NotReady)
    pub fn player_translation(&self) -> Option<Vec3> {
        self.bodies.get(self.player).map(|b| from_na(b.translation()))
    }

    /// Current player linear velocity; `None` until the body exists
    pub fn player_linvel(&self) -> Option<Vec3> {
        self.bodies.get(self.player).map(|b| from_na(b.linvel()))
    }

    pub fn set_player_translation(&mut self, pos: Vec3) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.set_translation(to_na(pos), true);
        }
    }

    /// Teleport to `pos` with zero linear and angular velocity (reset path)
    pub fn reset_player(&mut self, pos: Vec3) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.set_translation(to_na(pos), true);
            body.set_linvel(vector![0.0, 0.0, 0.0], true);
            body.set_angvel(vector![0.0, 0.0, 0.0], true);
        }
    }

    /// Distance to the nearest surface directly below the player, measured
    /// from slightly under the body center. `None` when nothing is within
    /// the ray length (airborne) or the body is not ready.
    pub fn ground_distance(&self) -> Option<f32> {
        let origin = self.player_translation()? - Vec3::new(0.0, GROUND_RAY_OFFSET, 0.0);
        let ray = Ray::new(point![origin.x, origin.y, origin.z], vector![0.0, -1.0, 0.0]);
        let filter = QueryFilter::default().exclude_rigid_body(self.player);
        self.query_pipeline
            .cast_ray(&self.bodies, &self.colliders, &ray, GROUND_RAY_MAX, true, filter)
            .map(|(_, toi)| toi)
    }

    // --- hazards ---

    /// Create the kinematic body for a freshly spawned segment
    pub fn spawn_segment(&mut self, segment: &ObstacleSegment, initial: Pose) {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(to_na(initial.translation))
            .build();
        let handle = self.bodies.insert(body);
        let (hx, hy, hz) = hazard_half_extents(segment.archetype);
        let mut collider = ColliderBuilder::cuboid(hx, hy, hz).restitution(0.2);
        // The fast bar hazards are frictionless so they bat the ball instead
        // of grabbing it
        if matches!(
            segment.archetype,
            ObstacleArchetype::Spinner | ObstacleArchetype::Limbo | ObstacleArchetype::Axe
        ) {
            collider = collider.friction(0.0);
        }
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);
        self.obstacles.insert(segment.id, handle);
        self.query_pipeline.update(&self.colliders);
    }

    /// Remove an evicted segment's body; unknown ids are a no-op
    pub fn despawn_segment(&mut self, id: u64) {
        let Some(handle) = self.obstacles.remove(&id) else {
            log::warn!("despawn of unknown segment {id}");
            return;
        };
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.query_pipeline.update(&self.colliders);
    }

    /// Set the kinematic target consumed by the next `step`
    pub fn set_obstacle_target(&mut self, id: u64, pose: Pose) {
        let Some(&handle) = self.obstacles.get(&id) else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_next_kinematic_translation(to_na(pose.translation));
            body.set_next_kinematic_rotation(to_na_quat(pose.rotation));
        }
    }

    /// Drop all hazard bodies (window regeneration path)
    pub fn despawn_all_segments(&mut self) {
        let ids: Vec<u64> = self.obstacles.keys().copied().collect();
        for id in ids {
            self.despawn_segment(id);
        }
    }

    pub fn active_obstacles(&self) -> usize {
        self.obstacles.len()
    }

    // --- corridor ---

    /// Re-center the floor strip and walls on the player's longitudinal
    /// position so containment moves with the player.
    pub fn recenter_corridor(&mut self, player_z: f32) {
        if let Some(body) = self.bodies.get_mut(self.corridor) {
            body.set_translation(vector![0.0, 0.0, player_z], true);
        }
    }
}
