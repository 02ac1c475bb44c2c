use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;
use crate::components::animation::{AnimationComponent, AnimationDef};
use crate::components::sprite::{SpriteComponent, AtlasId};

/// Registry of named sprites and animations, built from an AssetManifest.
/// Provides name-based lookup for game code.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
    animations: HashMap<String, AnimationDef>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest.
    ///
    /// Animation frames are resolved against the sprite table; frames that
    /// name no sprite are dropped, and an animation left with no frames is
    /// skipped.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            sprites.insert(
                name.clone(),
                SpriteComponent::new(AtlasId(desc.atlas), desc.col as f32, desc.row as f32),
            );
        }

        let mut animations = HashMap::with_capacity(manifest.animations.len());
        for (name, desc) in &manifest.animations {
            let mut frames = Vec::new();
            for frame in desc.frame_names() {
                match sprites.get(&frame) {
                    Some(sprite) => frames.push((sprite.col, sprite.row)),
                    None => log::warn!("animation '{}': unknown frame '{}'", name, frame),
                }
            }
            if frames.is_empty() {
                log::warn!("animation '{}' has no frames, skipped", name);
                continue;
            }
            animations.insert(name.clone(), AnimationDef::from_frames(frames, desc.fps, desc.looping));
        }

        Self { sprites, animations }
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationDef> {
        self.animations.get(name)
    }

    /// An animation component holding every known animation in `names`.
    pub fn animation_set(&self, names: &[&str]) -> AnimationComponent {
        let mut component = AnimationComponent::default();
        for name in names {
            if let Some(def) = self.animations.get(*name) {
                component.add(*name, def.clone());
            }
        }
        component
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}
