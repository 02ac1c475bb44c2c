//! Screen-space dialog panel.
//!
//! Mirrors the dialog machine's panel surface into UI entities: one
//! background quad plus word-wrapped glyphs. Entities are only rebuilt when
//! the surface revision or the viewport changes.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;
use crate::core::scene::Scene;
use crate::interaction::config::PanelConfig;
use crate::interaction::dialog::SurfaceState;
use crate::systems::text::{build_wrapped_text_entities, despawn_text, FontConfig};

pub const PANEL_TAG: &str = "dialog_panel";
pub const PANEL_TEXT_TAG: &str = "dialog_panel_text";

#[derive(Debug, Clone)]
pub struct DialogPanel {
    config: PanelConfig,
    font: FontConfig,
    text_size: f32,
    line_height: f32,
    background: Option<SpriteComponent>,
    synced: Option<(u32, Vec2)>,
}

impl DialogPanel {
    pub fn new(config: PanelConfig, font: FontConfig) -> Self {
        Self {
            config,
            font,
            text_size: 14.0,
            line_height: 18.0,
            background: None,
            synced: None,
        }
    }

    /// Sprite stretched behind the text.
    pub fn with_background(mut self, sprite: SpriteComponent) -> Self {
        self.background = Some(sprite);
        self
    }

    pub fn set_background(&mut self, sprite: Option<SpriteComponent>) {
        self.background = sprite;
        self.synced = None;
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Bring the panel entities in line with `surface`. Returns true when
    /// entities were rebuilt.
    pub fn sync<F>(
        &mut self,
        scene: &mut Scene,
        surface: &SurfaceState,
        viewport: Vec2,
        id_gen: &mut F,
    ) -> bool
    where
        F: FnMut() -> EntityId,
    {
        let key = (surface.revision, viewport);
        if self.synced == Some(key) {
            return false;
        }
        self.synced = Some(key);

        scene.despawn_tagged(PANEL_TAG);
        despawn_text(scene, PANEL_TEXT_TAG);

        if !surface.visible {
            return true;
        }
        let Some(rect) = self.config.layout(viewport) else {
            return true;
        };

        if let Some(sprite) = &self.background {
            scene.spawn(
                Entity::new(id_gen())
                    .with_tag(PANEL_TAG)
                    .with_pos(rect.center())
                    .with_scale(rect.size)
                    .with_layer(RenderLayer::Ui)
                    .with_sprite(sprite.clone()),
            );
        }

        let area = self.config.text_area(&rect);
        for glyph in build_wrapped_text_entities(
            &surface.text,
            &area,
            self.text_size,
            self.line_height,
            &self.font,
            PANEL_TEXT_TAG,
            id_gen,
        ) {
            scene.spawn(glyph);
        }
        true
    }
}
