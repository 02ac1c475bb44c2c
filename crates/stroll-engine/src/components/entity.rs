use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::animation::AnimationComponent;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not drawn).
    pub active: bool,
    /// Center position. World units, or screen pixels on the UI layer.
    pub pos: Vec2,
    /// Rendered size (width, height).
    pub scale: Vec2,
    /// Draw order bucket. `RenderLayer::Ui` entities are screen-space.
    pub layer: RenderLayer,
    /// Sprite component (optional; entities without sprites are invisible).
    pub sprite: Option<SpriteComponent>,
    /// Frame animation driving `sprite`.
    pub animation: Option<AnimationComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            scale: Vec2::ONE,
            layer: RenderLayer::default(),
            sprite: None,
            animation: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: AnimationComponent) -> Self {
        self.animation = Some(animation);
        self
    }
}
