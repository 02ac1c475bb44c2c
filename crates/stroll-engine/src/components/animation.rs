//! Named frame animations for sprites (walk cycles).

use std::collections::HashMap;

/// Definition of a single animation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Frames as (col, row) cells in the atlas.
    pub frames: Vec<(f32, f32)>,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether to loop when reaching the end.
    pub looping: bool,
}

impl AnimationDef {
    /// Create from an explicit frame list.
    pub fn from_frames(frames: Vec<(f32, f32)>, fps: f32, looping: bool) -> Self {
        Self {
            frames,
            frame_duration: 1.0 / fps.max(f32::EPSILON),
            looping,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Animation state for an entity.
#[derive(Debug, Clone, Default)]
pub struct AnimationComponent {
    /// Named animations available for this entity.
    pub animations: HashMap<String, AnimationDef>,
    /// Currently selected animation name (empty = none).
    pub current: String,
    pub frame_index: usize,
    /// Time accumulated in current frame.
    pub frame_timer: f32,
    pub playing: bool,
}

impl AnimationComponent {
    pub fn new(animations: HashMap<String, AnimationDef>) -> Self {
        Self {
            animations,
            ..Default::default()
        }
    }

    pub fn add(&mut self, name: impl Into<String>, def: AnimationDef) {
        self.animations.insert(name.into(), def);
    }

    /// Play a named animation from the beginning. Unknown names are ignored.
    pub fn play(&mut self, name: &str) {
        if self.animations.contains_key(name) {
            self.current = name.to_string();
            self.frame_index = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
    }

    /// Keep the running animation going if it is already `name`.
    pub fn play_if_different(&mut self, name: &str) {
        if self.current != name || !self.playing {
            self.play(name);
        }
    }

    /// Stop playback. The sprite keeps whatever frame it shows.
    pub fn stop(&mut self) {
        self.playing = false;
        self.current.clear();
        self.frame_index = 0;
        self.frame_timer = 0.0;
    }

    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.animations.get(&self.current)
    }

    /// Current (col, row), or None when stopped.
    pub fn current_frame(&self) -> Option<(f32, f32)> {
        if !self.playing {
            return None;
        }
        self.current_def()
            .and_then(|def| def.frames.get(self.frame_index).copied())
    }

    /// Advance animation by dt seconds. Returns true if frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }
        let Some(def) = self.animations.get(&self.current) else {
            return false;
        };
        if def.frames.is_empty() {
            return false;
        }

        self.frame_timer += dt;
        let mut frame_changed = false;
        while self.frame_timer >= def.frame_duration {
            self.frame_timer -= def.frame_duration;
            self.frame_index += 1;
            frame_changed = true;
            if self.frame_index >= def.frames.len() {
                if def.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = def.frames.len() - 1;
                    self.playing = false;
                    break;
                }
            }
        }
        frame_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> AnimationDef {
        AnimationDef::from_frames(vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0)], 10.0, true)
    }

    #[test]
    fn walk_cycle_loops() {
        let mut anim = AnimationComponent::default();
        anim.add("walk", walk());
        anim.play("walk");
        assert_eq!(anim.current_frame(), Some((0.0, 1.0)));

        anim.tick(0.15);
        assert_eq!(anim.current_frame(), Some((1.0, 1.0)));
        anim.tick(0.3);
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn play_if_different_keeps_progress() {
        let mut anim = AnimationComponent::default();
        anim.add("left", walk());
        anim.add("right", walk());
        anim.play("left");
        anim.tick(0.1);
        let frame = anim.frame_index;

        anim.play_if_different("left");
        assert_eq!(anim.frame_index, frame);

        anim.play_if_different("right");
        assert_eq!(anim.current, "right");
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn stop_clears_current_frame() {
        let mut anim = AnimationComponent::default();
        anim.add("walk", walk());
        anim.play("walk");
        anim.stop();
        assert!(anim.current_frame().is_none());
        assert!(!anim.tick(1.0));
    }

    #[test]
    fn unknown_animation_is_ignored() {
        let mut anim = AnimationComponent::default();
        anim.play("missing");
        assert!(!anim.playing);
    }
}
