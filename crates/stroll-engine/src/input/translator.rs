//! Turns raw key and pointer events into a movement intent.
//!
//! Keys produce a continuous `Directional` intent while held. Pointer
//! gestures produce one-shot intents: a swipe picks a cardinal direction,
//! a tap either stops the avatar or sets a target point to walk to.

use glam::Vec2;
use crate::input::queue::{DirectionKey, InputEvent, KeyEdge, PointerPhase};
use crate::interaction::config::GestureConfig;

/// The axis a target-point walk is currently travelling along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis with the larger displacement. Ties go to X.
    pub fn dominant(delta: Vec2) -> Self {
        if delta.x.abs() >= delta.y.abs() {
            Axis::X
        } else {
            Axis::Y
        }
    }

    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// What the avatar is currently trying to do. Replaced wholesale on new input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementIntent {
    /// Walk along a direction. A zero vector is legal and means standing still.
    Directional(Vec2),
    /// Walk to a world point, one axis at a time, starting with `axis`.
    TargetPoint { point: Vec2, axis: Axis },
    Stop,
}

impl Default for MovementIntent {
    fn default() -> Self {
        MovementIntent::Stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PointerDown {
    screen: Vec2,
    t_ms: f64,
}

/// Stateful input classifier. Remembers held keys and the open pointer press.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    gestures: GestureConfig,
    /// Held keys by raw code. Arrow keys and WASD share directions.
    held: Vec<(u32, DirectionKey)>,
    pressed: Option<PointerDown>,
}

impl InputTranslator {
    pub fn new(gestures: GestureConfig) -> Self {
        Self {
            gestures,
            held: Vec::with_capacity(4),
            pressed: None,
        }
    }

    /// Combined vector of every held direction key; opposing keys cancel.
    pub fn held_vector(&self) -> Vec2 {
        DirectionKey::ALL
            .iter()
            .filter(|key| self.held.iter().any(|(_, held)| held == *key))
            .fold(Vec2::ZERO, |acc, key| acc + key.vector())
    }

    pub fn any_key_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Forget held keys and any open press, e.g. when the page loses focus.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed = None;
    }

    /// Classify one event.
    ///
    /// `avatar` is the avatar's world position and `to_world` converts
    /// screen coordinates to world coordinates. Returns the new intent, or
    /// `None` when the event leaves the current intent unchanged.
    pub fn translate(
        &mut self,
        event: &InputEvent,
        avatar: Vec2,
        to_world: impl Fn(Vec2) -> Vec2,
    ) -> Option<MovementIntent> {
        match *event {
            InputEvent::Key { key, code, edge } => {
                match edge {
                    KeyEdge::Down => {
                        if !self.held.iter().any(|(held, _)| *held == code) {
                            self.held.push((code, key));
                        }
                    }
                    KeyEdge::Up => self.held.retain(|(held, _)| *held != code),
                }
                if self.any_key_held() {
                    Some(MovementIntent::Directional(self.held_vector()))
                } else {
                    None
                }
            }
            InputEvent::Pointer { phase: PointerPhase::Down, x, y, t_ms } => {
                self.pressed = Some(PointerDown {
                    screen: Vec2::new(x, y),
                    t_ms,
                });
                None
            }
            InputEvent::Pointer { phase: PointerPhase::Up, x, y, t_ms } => {
                let down = self.pressed.take()?;
                let up = Vec2::new(x, y);
                self.classify_release(down, up, t_ms, avatar, to_world)
            }
            InputEvent::FocusLost => {
                self.reset();
                None
            }
        }
    }

    fn classify_release(
        &self,
        down: PointerDown,
        up: Vec2,
        t_ms: f64,
        avatar: Vec2,
        to_world: impl Fn(Vec2) -> Vec2,
    ) -> Option<MovementIntent> {
        let drag = up - down.screen;
        let threshold = self.gestures.swipe_threshold;
        if drag.length_squared() >= threshold * threshold {
            let dir = match Axis::dominant(drag) {
                Axis::X => Vec2::new(sign(drag.x), 0.0),
                Axis::Y => Vec2::new(0.0, sign(drag.y)),
            };
            log::debug!("swipe {:?}", dir);
            return Some(MovementIntent::Directional(dir));
        }

        if t_ms - down.t_ms > self.gestures.max_tap_ms {
            return None;
        }

        let point = to_world(up);
        let delta = point - avatar;
        let radius = self.gestures.stop_radius;
        if delta.length_squared() <= radius * radius {
            Some(MovementIntent::Stop)
        } else {
            Some(MovementIntent::TargetPoint {
                point,
                axis: Axis::dominant(delta),
            })
        }
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

/// Sign with zero treated as positive.
pub(crate) fn sign(v: f32) -> f32 {
    if v >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
