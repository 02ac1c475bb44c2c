//! The player-controlled avatar: position, collision box, facing, lock.

use glam::Vec2;
use crate::core::geometry::Rect;

/// Which way the avatar is looking / walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    Right,
    Up,
    Down,
    #[default]
    Idle,
}

impl Facing {
    /// Facing implied by a velocity. Horizontal wins when both axes move.
    pub fn from_velocity(velocity: Vec2) -> Self {
        if velocity.x < 0.0 {
            Facing::Left
        } else if velocity.x > 0.0 {
            Facing::Right
        } else if velocity.y < 0.0 {
            Facing::Up
        } else if velocity.y > 0.0 {
            Facing::Down
        } else {
            Facing::Idle
        }
    }
}

/// Collision box of the avatar relative to its sprite frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarBody {
    /// Size of the sprite frame; `Avatar::pos` is its center.
    pub frame_size: Vec2,
    /// Size of the collision box.
    pub size: Vec2,
    /// Top-left of the collision box, measured from the frame's top-left.
    pub offset: Vec2,
}

impl Default for AvatarBody {
    fn default() -> Self {
        Self {
            frame_size: Vec2::new(32.0, 64.0),
            size: Vec2::new(30.0, 40.0),
            offset: Vec2::new(0.0, 24.0),
        }
    }
}

impl AvatarBody {
    /// Vector from the frame center to the collision box center.
    fn center_offset(&self) -> Vec2 {
        self.offset + self.size / 2.0 - self.frame_size / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// Sprite center in world units.
    pub pos: Vec2,
    /// Velocity in world units per second, as resolved by the last step.
    pub velocity: Vec2,
    pub body: AvatarBody,
    /// Facing derived from the current velocity.
    pub facing: Facing,
    /// Last facing with non-zero velocity.
    pub heading: Facing,
    movement_locked: bool,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity: Vec2::ZERO,
            body: AvatarBody::default(),
            facing: Facing::Idle,
            heading: Facing::Down,
            movement_locked: false,
        }
    }

    /// World-space collision box.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_center(self.body_center(), self.body.size)
    }

    pub fn body_center(&self) -> Vec2 {
        self.pos + self.body.center_offset()
    }

    /// Move the avatar so its collision box is centered on `center`.
    pub fn set_body_center(&mut self, center: Vec2) {
        self.pos = center - self.body.center_offset();
    }

    pub fn lock_movement(&mut self) {
        self.movement_locked = true;
    }

    pub fn unlock_movement(&mut self) {
        self.movement_locked = false;
    }

    pub fn is_movement_locked(&self) -> bool {
        self.movement_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_uses_offset_from_frame_top_left() {
        let avatar = Avatar::new(Vec2::new(100.0, 100.0));
        let bb = avatar.bounding_box();
        // frame top-left = (84, 68); box at +(0, 24), 30x40
        assert_eq!(bb.min, Vec2::new(84.0, 92.0));
        assert_eq!(bb.size, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn body_center_round_trip() {
        let mut avatar = Avatar::new(Vec2::new(10.0, 20.0));
        let center = avatar.body_center();
        avatar.pos = Vec2::ZERO;
        avatar.set_body_center(center);
        assert_eq!(avatar.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn horizontal_facing_wins() {
        assert_eq!(Facing::from_velocity(Vec2::new(-1.0, 5.0)), Facing::Left);
        assert_eq!(Facing::from_velocity(Vec2::new(0.0, -5.0)), Facing::Up);
        assert_eq!(Facing::from_velocity(Vec2::ZERO), Facing::Idle);
    }

    #[test]
    fn lock_flag_toggles() {
        let mut avatar = Avatar::new(Vec2::ZERO);
        avatar.lock_movement();
        assert!(avatar.is_movement_locked());
        avatar.unlock_movement();
        assert!(!avatar.is_movement_locked());
    }
}
