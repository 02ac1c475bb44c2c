//! Per-step velocity and pose resolution for the avatar.

use glam::Vec2;
use crate::components::avatar::{Avatar, Facing};
use crate::core::collision::CollisionGrid;
use crate::input::translator::{sign, Axis, MovementIntent};
use crate::interaction::config::MotionConfig;

/// What the avatar's animation should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseCommand {
    /// Play the walk cycle for this facing (no restart if already playing).
    Walk(Facing),
    /// Stop walking and show the idle frame for this facing.
    Rest(Facing),
    /// Stop walking, leave the current frame alone.
    Hold,
}

/// Moves the avatar once velocity is known. Implemented by the tile
/// collision grid, the rapier world, and `FreeMotion`.
pub trait MotionSubstrate {
    /// Integrate `avatar.velocity` over `dt` seconds, updating `avatar.pos`.
    /// Axes that were blocked have their velocity zeroed.
    fn advance(&mut self, avatar: &mut Avatar, dt: f32);
}

/// Unobstructed integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeMotion;

impl MotionSubstrate for FreeMotion {
    fn advance(&mut self, avatar: &mut Avatar, dt: f32) {
        avatar.pos += avatar.velocity * dt;
    }
}

impl MotionSubstrate for CollisionGrid {
    fn advance(&mut self, avatar: &mut Avatar, dt: f32) {
        let (applied, blocked) = self.sweep(&avatar.bounding_box(), avatar.velocity * dt);
        avatar.pos += applied;
        if blocked[0] {
            avatar.velocity.x = 0.0;
        }
        if blocked[1] {
            avatar.velocity.y = 0.0;
        }
    }
}

/// Holds the live movement intent and turns it into velocity each step.
#[derive(Debug, Clone)]
pub struct MotionResolver {
    config: MotionConfig,
    intent: MovementIntent,
}

impl MotionResolver {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            intent: MovementIntent::Stop,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// Replace the current intent.
    pub fn set_intent(&mut self, intent: MovementIntent) {
        self.intent = intent;
    }

    /// Set `avatar.velocity` and facing for this step.
    ///
    /// The velocity the avatar ended the previous step with decides which
    /// idle frame to show when it comes to rest.
    pub fn resolve(&mut self, avatar: &mut Avatar) -> PoseCommand {
        let previous = avatar.velocity;

        if avatar.is_movement_locked() {
            avatar.velocity = Vec2::ZERO;
            avatar.facing = Facing::Idle;
            return PoseCommand::Hold;
        }

        let velocity = match self.intent {
            MovementIntent::Stop => Vec2::ZERO,
            MovementIntent::Directional(dir) => dir.normalize_or_zero() * self.config.speed,
            MovementIntent::TargetPoint { point, axis } => self.home(avatar.pos, point, axis),
        };
        avatar.velocity = velocity;

        if velocity == Vec2::ZERO {
            avatar.facing = Facing::Idle;
            return match Facing::from_velocity(previous) {
                Facing::Idle => PoseCommand::Hold,
                rest => {
                    avatar.heading = rest;
                    PoseCommand::Rest(rest)
                }
            };
        }

        let facing = Facing::from_velocity(velocity);
        avatar.facing = facing;
        avatar.heading = facing;
        PoseCommand::Walk(facing)
    }

    /// L-shaped walk towards `point`: travel along `axis` until that
    /// component is within the arrival radius, then along the other one.
    fn home(&mut self, pos: Vec2, point: Vec2, axis: Axis) -> Vec2 {
        let d = point - pos;
        let arrival = self.config.arrival_radius;
        if d.length_squared() <= arrival * arrival {
            self.intent = MovementIntent::Stop;
            return Vec2::ZERO;
        }

        let along = |axis: Axis| match axis {
            Axis::X => d.x,
            Axis::Y => d.y,
        };
        let axis = if along(axis).abs() <= arrival {
            let switched = axis.other();
            self.intent = MovementIntent::TargetPoint { point, axis: switched };
            switched
        } else {
            axis
        };

        let speed = self.config.speed;
        match axis {
            Axis::X => Vec2::new(sign(d.x) * speed, 0.0),
            Axis::Y => Vec2::new(0.0, sign(d.y) * speed),
        }
    }
}

impl Default for MotionResolver {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn directional_is_normalized_to_speed() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::ZERO);
        motion.set_intent(MovementIntent::Directional(Vec2::new(3.0, 4.0)));
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Walk(Facing::Right));
        assert!((avatar.velocity.length() - 175.0).abs() < 1e-3);
    }

    #[test]
    fn zero_direction_stands_still() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::ZERO);
        motion.set_intent(MovementIntent::Directional(Vec2::ZERO));
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Hold);
        assert_eq!(avatar.velocity, Vec2::ZERO);
    }

    #[test]
    fn lock_forces_zero_velocity() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::ZERO);
        avatar.velocity = Vec2::new(175.0, 0.0);
        avatar.lock_movement();
        motion.set_intent(MovementIntent::Directional(Vec2::X));
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Hold);
        assert_eq!(avatar.velocity, Vec2::ZERO);
        // intent survives the lock
        assert_eq!(motion.intent(), MovementIntent::Directional(Vec2::X));
    }

    #[test]
    fn stopping_rests_on_last_direction() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::ZERO);
        motion.set_intent(MovementIntent::Directional(Vec2::new(0.0, -1.0)));
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Walk(Facing::Up));
        motion.set_intent(MovementIntent::Stop);
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Rest(Facing::Up));
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Hold);
        assert_eq!(avatar.heading, Facing::Up);
    }

    #[test]
    fn horizontal_facing_takes_precedence() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::ZERO);
        motion.set_intent(MovementIntent::Directional(Vec2::new(-1.0, 1.0)));
        assert_eq!(motion.resolve(&mut avatar), PoseCommand::Walk(Facing::Left));
    }

    #[test]
    fn homing_walks_an_l_shape_and_arrives() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::new(100.0, 100.0));
        let target = Vec2::new(200.0, 160.0);
        motion.set_intent(MovementIntent::TargetPoint { point: target, axis: Axis::X });

        let mut switched_to_y = false;
        for _ in 0..600 {
            motion.resolve(&mut avatar);
            let v = avatar.velocity;
            assert!(v.x == 0.0 || v.y == 0.0, "diagonal velocity {:?}", v);
            if v.y != 0.0 {
                switched_to_y = true;
            }
            if switched_to_y {
                assert_eq!(v.x, 0.0, "went back to X after switching");
            }
            FreeMotion.advance(&mut avatar, DT);
            if motion.intent() == MovementIntent::Stop {
                break;
            }
        }
        assert_eq!(motion.intent(), MovementIntent::Stop);
        assert!(switched_to_y);
        assert!(avatar.pos.distance(target) <= 6.0);
        motion.resolve(&mut avatar);
        assert_eq!(avatar.velocity, Vec2::ZERO);
    }

    #[test]
    fn homing_within_arrival_radius_stops_immediately() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::new(10.0, 10.0));
        motion.set_intent(MovementIntent::TargetPoint { point: Vec2::new(13.0, 14.0), axis: Axis::Y });
        motion.resolve(&mut avatar);
        assert_eq!(avatar.velocity, Vec2::ZERO);
        assert_eq!(motion.intent(), MovementIntent::Stop);
    }

    #[test]
    fn homing_switches_axis_when_first_axis_is_close() {
        let mut motion = MotionResolver::default();
        let mut avatar = Avatar::new(Vec2::ZERO);
        motion.set_intent(MovementIntent::TargetPoint { point: Vec2::new(3.0, -50.0), axis: Axis::X });
        motion.resolve(&mut avatar);
        assert_eq!(avatar.velocity, Vec2::new(0.0, -175.0));
        assert_eq!(
            motion.intent(),
            MovementIntent::TargetPoint { point: Vec2::new(3.0, -50.0), axis: Axis::Y }
        );
    }

    #[test]
    fn collision_grid_zeroes_blocked_axis() {
        // wall column at tile x = 3 (world x 96..128)
        let mut grid = CollisionGrid::open(8, 8, 32.0);
        for y in 0..8 {
            grid.set_solid(3, y, true);
        }
        let mut avatar = Avatar::new(Vec2::new(81.0, 100.0));
        // box spans x 65..95
        avatar.velocity = Vec2::new(175.0, 60.0);
        grid.advance(&mut avatar, DT);
        assert_eq!(avatar.velocity.x, 0.0);
        assert_eq!(avatar.pos.x, 81.0);
        assert!(avatar.pos.y > 100.0);
    }
}
