use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// A walking scene holds one avatar, a panel and a handful of glyphs.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(128),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Remove every entity carrying `tag`. Returns how many were removed.
    pub fn despawn_tagged(&mut self, tag: &str) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.tag != tag);
        before - self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_keeps_spawn_order() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.despawn(EntityId(1));
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn despawn_tagged_removes_group() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("glyph"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("glyph"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("avatar"));
        assert_eq!(scene.despawn_tagged("glyph"), 2);
        assert_eq!(scene.find_by_tag("avatar").unwrap().id, EntityId(3));
    }
}
