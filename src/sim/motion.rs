//! Obstacle motion laws
//!
//! Each archetype maps (elapsed time, per-instance speed, base position) to a
//! target kinematic pose. The physics engine moves the kinematic body toward
//! the target on its next step and handles collisions; nothing here mutates
//! state, so a segment's trajectory is fully determined by its creation draw.

use glam::{Quat, Vec3};

use super::level::ObstacleArchetype;

/// Target pose for a kinematic hazard body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    fn at(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }
}

/// Resting height of the bar-style hazards above the segment floor
const BAR_REST_HEIGHT: f32 = 0.3;

/// Evaluate an archetype's motion law
pub fn kinematic_pose(
    archetype: ObstacleArchetype,
    base: Vec3,
    speed: f32,
    elapsed: f32,
) -> Pose {
    let phase = (elapsed * speed).sin();
    match archetype {
        ObstacleArchetype::Spinner => Pose {
            translation: base + Vec3::new(0.0, BAR_REST_HEIGHT, 0.0),
            rotation: Quat::from_rotation_y(elapsed * speed),
        },
        ObstacleArchetype::Limbo => {
            Pose::at(Vec3::new(base.x, base.y + 1.5 + phase, base.z))
        }
        ObstacleArchetype::Axe => {
            Pose::at(Vec3::new(base.x + phase, base.y + 0.8, base.z))
        }
        ObstacleArchetype::Pendulum => {
            Pose::at(Vec3::new(base.x + 1.5 * phase, base.y + 1.0, base.z))
        }
        // Rectified bounce: touches y=0.5, rises to y=2.5, never below floor
        ObstacleArchetype::Crusher => {
            Pose::at(Vec3::new(base.x, phase.abs() * 2.0 + 0.5, base.z))
        }
        ObstacleArchetype::Pusher => {
            Pose::at(Vec3::new(base.x + 1.5 * phase, base.y + 0.8, base.z))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: Vec3 = Vec3::new(0.0, 0.0, -8.0);

    #[test]
    fn test_spinner_rotates_about_y() {
        let pose = kinematic_pose(ObstacleArchetype::Spinner, BASE, 1.3, 2.0);
        assert_eq!(pose.translation, Vec3::new(0.0, 0.3, -8.0));
        let expected = Quat::from_rotation_y(2.6);
        assert!(pose.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_limbo_oscillates_within_band() {
        for i in 0..200 {
            let t = i as f32 * 0.1;
            let pose = kinematic_pose(ObstacleArchetype::Limbo, BASE, 1.5, t);
            assert!(pose.translation.y >= BASE.y + 0.5 - 1e-6);
            assert!(pose.translation.y <= BASE.y + 2.5 + 1e-6);
            assert_eq!(pose.translation.x, BASE.x);
        }
    }

    #[test]
    fn test_axe_fixed_height() {
        let pose = kinematic_pose(ObstacleArchetype::Axe, BASE, 1.0, 0.7);
        assert_eq!(pose.translation.y, BASE.y + 0.8);
        assert!((pose.translation.x - 0.7_f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_pendulum_and_pusher_amplitude() {
        // Peak of the swing at phase pi/2
        let speed = 1.0;
        let t = std::f32::consts::FRAC_PI_2;
        let pendulum = kinematic_pose(ObstacleArchetype::Pendulum, BASE, speed, t);
        assert!((pendulum.translation.x - 1.5).abs() < 1e-5);
        assert_eq!(pendulum.translation.y, BASE.y + 1.0);

        let pusher = kinematic_pose(ObstacleArchetype::Pusher, BASE, speed, t);
        assert!((pusher.translation.x - 1.5).abs() < 1e-5);
        assert_eq!(pusher.translation.y, BASE.y + 0.8);
    }

    #[test]
    fn test_crusher_touches_floor_and_ceiling() {
        let floor = kinematic_pose(ObstacleArchetype::Crusher, BASE, 1.0, 0.0);
        assert!((floor.translation.y - 0.5).abs() < 1e-6);
        let ceiling =
            kinematic_pose(ObstacleArchetype::Crusher, BASE, 1.0, std::f32::consts::FRAC_PI_2);
        assert!((ceiling.translation.y - 2.5).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_crusher_height_non_negative(
            elapsed in 0.0_f32..10_000.0,
            speed in 0.8_f32..1.8,
        ) {
            let pose = kinematic_pose(ObstacleArchetype::Crusher, BASE, speed, elapsed);
            prop_assert!(pose.translation.y >= 0.5 - 1e-6);
            prop_assert!(pose.translation.y <= 2.5 + 1e-6);
        }

        #[test]
        fn prop_lateral_hazards_stay_in_corridor(
            elapsed in 0.0_f32..10_000.0,
            speed in -2.0_f32..2.0,
        ) {
            for archetype in [ObstacleArchetype::Axe, ObstacleArchetype::Pendulum, ObstacleArchetype::Pusher] {
                let pose = kinematic_pose(archetype, BASE, speed, elapsed);
                prop_assert!((pose.translation.x - BASE.x).abs() <= 1.5 + 1e-6);
            }
        }

        #[test]
        fn prop_poses_are_pure(
            elapsed in 0.0_f32..1_000.0,
            speed in -2.0_f32..2.0,
        ) {
            for archetype in super::super::level::ARCHETYPES {
                let a = kinematic_pose(archetype, BASE, speed, elapsed);
                let b = kinematic_pose(archetype, BASE, speed, elapsed);
                prop_assert_eq!(a, b);
            }
        }
    }
}
