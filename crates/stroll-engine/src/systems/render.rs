use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::tilemap::TilemapComponent;
use crate::core::geometry::Rect;
use crate::core::scene::Scene;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer for one frame.
///
/// Output is ordered by `RenderLayer`: for each world layer its tiles come
/// first, then its entities in spawn order. World-space output is culled to
/// the camera. Screen-space UI entities follow, starting at `ui_start`.
pub fn build_render_buffer(
    scene: &Scene,
    tilemaps: &[TilemapComponent],
    camera: &Camera2D,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    let visible = camera.visible_rect();

    for layer in RenderLayer::ALL {
        if layer.is_screen_space() {
            buffer.begin_ui();
        } else {
            for tilemap in tilemaps.iter().filter(|t| t.layer == layer) {
                tilemap.push_visible_instances(&visible, &mut buffer.instances);
            }
        }

        for entity in scene.iter().filter(|e| e.layer == layer) {
            let Some(instance) = entity_instance(entity) else {
                continue;
            };
            if !layer.is_screen_space() && !visible.overlaps(&entity_rect(entity)) {
                continue;
            }
            buffer.push(instance);
        }
    }
}

fn entity_rect(entity: &Entity) -> Rect {
    Rect::from_center(entity.pos, entity.scale)
}

fn entity_instance(entity: &Entity) -> Option<RenderInstance> {
    if !entity.active {
        return None;
    }
    let sprite = entity.sprite.as_ref()?;
    Some(RenderInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        width: entity.scale.x,
        height: entity.scale.y,
        atlas: sprite.atlas.0 as f32,
        col: sprite.col,
        row: sprite.row,
        alpha: sprite.alpha,
    })
}
