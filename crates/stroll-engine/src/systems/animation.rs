//! Animation system: ticks animations and copies frames onto sprites.

use crate::core::scene::Scene;

/// Tick all entity animations and update their sprite cell.
///
/// Stopped animations leave the sprite alone, so a frozen idle frame set by
/// game code survives until the next walk starts.
pub fn tick_animations(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut() {
        let Some(anim) = entity.animation.as_mut() else {
            continue;
        };
        anim.tick(dt);
        if let (Some((col, row)), Some(sprite)) = (anim.current_frame(), entity.sprite.as_mut()) {
            sprite.set_cell(col, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::animation::{AnimationComponent, AnimationDef};
    use crate::components::entity::Entity;
    use crate::components::sprite::SpriteComponent;

    fn walker() -> Entity {
        let mut anim = AnimationComponent::default();
        anim.add(
            "walk",
            AnimationDef::from_frames(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], 10.0, true),
        );
        anim.play("walk");
        Entity::new(EntityId(1))
            .with_sprite(SpriteComponent::default())
            .with_animation(anim)
    }

    #[test]
    fn tick_updates_sprite_frame() {
        let mut scene = Scene::new();
        scene.spawn(walker());
        tick_animations(&mut scene, 0.15);
        assert_eq!(scene.get(EntityId(1)).unwrap().sprite.as_ref().unwrap().col, 1.0);
    }

    #[test]
    fn stopped_animation_keeps_idle_frame() {
        let mut scene = Scene::new();
        scene.spawn(walker());
        {
            let e = scene.get_mut(EntityId(1)).unwrap();
            e.animation.as_mut().unwrap().stop();
            e.sprite.as_mut().unwrap().set_cell(7.0, 3.0);
        }
        tick_animations(&mut scene, 0.5);
        let sprite = scene.get(EntityId(1)).unwrap().sprite.clone().unwrap();
        assert_eq!((sprite.col, sprite.row), (7.0, 3.0));
    }
}
