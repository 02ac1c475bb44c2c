//! Memory Walk: stroll a small neighbourhood, read what each corner remembers.
//!
//! The first touch of the `start` zone plays a short locked intro; after
//! that, walking into one of the named object zones types its message into
//! the panel and the page overlay, and walking out clears both.

use stroll_engine::api::game::GameConfig;
use stroll_engine::api::types::EntityId;
use stroll_engine::assets::registry::SpriteRegistry;
use stroll_engine::components::entity::Entity;
use stroll_engine::components::layer::RenderLayer;
use stroll_engine::core::scene::Scene;
use stroll_engine::input::queue::InputQueue;
use stroll_engine::interaction::engine::dialog_event_to_game_event;
use stroll_engine::systems::text::build_text_entities;
use stroll_engine::{
    tick_animations, AtlasId, Avatar, CollisionGrid, DialogPanel, EngineContext, FontConfig, Game,
    InteractionConfig, InteractionEngine, MotionSubstrate, PoseCommand, SpriteComponent,
    SurfaceState, WorldError, WorldMap, ZoneSet,
};

use crate::content::{
    idle_frame, walk_animation, ABOVE_LAYER, BELOW_LAYER, DEFAULT_SPAWN, HELP_POS, HELP_TEXT,
    HELP_TEXT_SIZE, INTRO_ZONE, OBJECT_LAYER, PANEL_SPRITE, SPAWN_POINT, TILESET, WALK_ANIMATIONS,
    WORLD_LAYER, ZONE_MESSAGES,
};

/// Atlas conventions: 0 = map tiles, 1 = characters, 2 = font.
const TILE_ATLAS: AtlasId = AtlasId(0);
const CHARACTER_ATLAS: AtlasId = AtlasId(1);
const FONT_ATLAS: AtlasId = AtlasId(2);

const AVATAR_TAG: &str = "avatar";
const HELP_TAG: &str = "help";

/// Everything that belongs to one loaded world.
struct Session {
    engine: InteractionEngine,
    substrate: Box<dyn MotionSubstrate>,
    avatar_entity: EntityId,
}

pub struct MemoryWalk {
    config: InteractionConfig,
    engine_config: GameConfig,
    panel: DialogPanel,
    session: Option<Session>,
}

impl MemoryWalk {
    pub fn new() -> Self {
        Self::with_config(InteractionConfig::default())
    }

    pub fn with_config(config: InteractionConfig) -> Self {
        let engine_config = GameConfig {
            zoom: config.zoom,
            ..GameConfig::default()
        };
        let panel = DialogPanel::new(config.panel, FontConfig::new(FONT_ATLAS));
        Self {
            config,
            engine_config,
            panel,
            session: None,
        }
    }

    /// The running interaction engine, once a world is loaded.
    pub fn engine(&self) -> Option<&InteractionEngine> {
        self.session.as_ref().map(|s| &s.engine)
    }

    #[cfg(feature = "physics")]
    fn make_substrate(&self, grid: &CollisionGrid, avatar: &Avatar) -> Box<dyn MotionSubstrate> {
        Box::new(stroll_engine::PhysicsSubstrate::new(grid, avatar, self.engine_config.gravity))
    }

    #[cfg(not(feature = "physics"))]
    fn make_substrate(&self, grid: &CollisionGrid, _avatar: &Avatar) -> Box<dyn MotionSubstrate> {
        Box::new(grid.clone())
    }
}

impl Default for MemoryWalk {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_avatar(scene: &mut Scene, sprites: &SpriteRegistry, id: EntityId, avatar: &Avatar) {
    let sprite = sprites
        .get(idle_frame(avatar.heading))
        .cloned()
        .unwrap_or_else(|| SpriteComponent::new(CHARACTER_ATLAS, 0.0, 0.0));
    scene.spawn(
        Entity::new(id)
            .with_tag(AVATAR_TAG)
            .with_pos(avatar.pos)
            .with_scale(avatar.body.frame_size)
            .with_layer(RenderLayer::Actors)
            .with_sprite(sprite)
            .with_animation(sprites.animation_set(&WALK_ANIMATIONS)),
    );
}

/// Move the avatar entity onto the simulated avatar and apply the pose.
fn apply_pose(
    scene: &mut Scene,
    sprites: &SpriteRegistry,
    id: EntityId,
    avatar: &Avatar,
    pose: PoseCommand,
) {
    let Some(entity) = scene.get_mut(id) else {
        return;
    };
    entity.pos = avatar.pos;
    match pose {
        PoseCommand::Walk(facing) => {
            if let (Some(anim), Some(name)) = (entity.animation.as_mut(), walk_animation(facing)) {
                anim.play_if_different(name);
            }
        }
        PoseCommand::Rest(facing) => {
            if let Some(anim) = entity.animation.as_mut() {
                anim.stop();
            }
            if let (Some(idle), Some(sprite)) = (sprites.get(idle_frame(facing)), entity.sprite.as_mut()) {
                sprite.set_cell(idle.col, idle.row);
            }
        }
        PoseCommand::Hold => {
            if let Some(anim) = entity.animation.as_mut() {
                anim.stop();
            }
        }
    }
}

fn sync_panel(panel: &mut DialogPanel, panel_surface: &SurfaceState, ctx: &mut EngineContext) {
    let viewport = ctx.camera.viewport;
    let (scene, mut ids) = ctx.scene_and_ids();
    panel.sync(scene, panel_surface, viewport, &mut ids);
}

impl Game for MemoryWalk {
    fn config(&self) -> GameConfig {
        self.engine_config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let font = FontConfig::new(FONT_ATLAS);
        let help = build_text_entities(HELP_TEXT, HELP_POS, HELP_TEXT_SIZE, &font, HELP_TAG, &mut ctx.id_gen());
        for glyph in help {
            ctx.scene.spawn(glyph);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = self.engine_config.fixed_dt;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let now = ctx.clock.now_ms();
        let camera = &ctx.camera;
        let report = session.engine.step(
            input.as_slice(),
            |p| camera.screen_to_world(p),
            session.substrate.as_mut(),
            dt,
            now,
        );

        apply_pose(&mut ctx.scene, &ctx.sprites, session.avatar_entity, &session.engine.avatar, report.pose);
        tick_animations(&mut ctx.scene, dt);
        ctx.camera.follow(session.engine.avatar.pos);

        for event in report.events {
            ctx.emit_event(dialog_event_to_game_event(event));
        }
        ctx.set_overlay(session.engine.dialog.overlay());
        sync_panel(&mut self.panel, session.engine.dialog.panel(), ctx);
    }

    fn resize(&mut self, ctx: &mut EngineContext, _width: f32, _height: f32) {
        if let Some(session) = &self.session {
            ctx.camera.follow(session.engine.avatar.pos);
            sync_panel(&mut self.panel, session.engine.dialog.panel(), ctx);
        }
    }

    fn load_world(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), WorldError> {
        // Build everything first; a failure leaves the previous world untouched.
        let map = WorldMap::from_json(json)?;
        if map.tileset(TILESET).is_none() {
            return Err(WorldError::MissingTileset);
        }
        let tilemaps = vec![
            map.tilemap(BELOW_LAYER, TILE_ATLAS, RenderLayer::Below)?,
            map.tilemap(WORLD_LAYER, TILE_ATLAS, RenderLayer::World)?,
            map.tilemap(ABOVE_LAYER, TILE_ATLAS, RenderLayer::Above)?,
        ];
        let grid = map.collision_grid(WORLD_LAYER)?;
        let zones = ZoneSet::from_regions(INTRO_ZONE, &ZONE_MESSAGES, |name| map.region(OBJECT_LAYER, name));
        let avatar = Avatar::new(map.spawn_point(OBJECT_LAYER, SPAWN_POINT, DEFAULT_SPAWN));
        let substrate = self.make_substrate(&grid, &avatar);
        let engine = InteractionEngine::new(&self.config, avatar, zones);

        if let Some(old) = self.session.take() {
            ctx.scene.despawn(old.avatar_entity);
        }
        ctx.tilemaps = tilemaps;
        ctx.camera.set_bounds(map.bounds());
        ctx.camera.follow(engine.avatar.pos);
        ctx.overlay = SurfaceState::default();

        let avatar_entity = ctx.next_id();
        spawn_avatar(&mut ctx.scene, &ctx.sprites, avatar_entity, &engine.avatar);
        self.panel.set_background(ctx.sprites.get(PANEL_SPRITE).cloned());
        sync_panel(&mut self.panel, engine.dialog.panel(), ctx);

        log::info!(
            "world loaded: {}x{} tiles, {} zones, spawn {:?}",
            map.width,
            map.height,
            engine.zones.info().len(),
            engine.avatar.pos
        );
        self.session = Some(Session {
            engine,
            substrate,
            avatar_entity,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use stroll_engine::{DirectionKey, EventKind, InputEvent, Rect};

    const DT: f32 = 1.0 / 60.0;
    const W: u32 = 40;
    const H: u32 = 30;
    const RAMEN: Rect = Rect {
        min: Vec2::new(400.0, 64.0),
        size: Vec2::new(64.0, 128.0),
    };

    /// A 40x30 map with a wall column at tile x = 20 and the given objects.
    fn map_json(objects: &str) -> String {
        let layer = |name: &str, gid_at: &dyn Fn(u32) -> u32| {
            let data: Vec<String> = (0..W * H).map(|i| gid_at(i % W).to_string()).collect();
            format!(
                r#"{{ "type": "tilelayer", "name": "{}", "width": {}, "height": {}, "data": [{}] }}"#,
                name,
                W,
                H,
                data.join(",")
            )
        };
        format!(
            r#"{{ "width": {w}, "height": {h}, "tilewidth": 32, "tileheight": 32,
                 "layers": [ {below}, {world}, {above},
                    {{ "type": "objectgroup", "name": "Objects", "objects": [ {objects} ] }} ],
                 "tilesets": [ {{ "firstgid": 1, "name": "{tileset}", "columns": 8,
                    "tiles": [ {{ "id": 1, "properties": [ {{ "name": "collides", "type": "bool", "value": true }} ] }} ] }} ] }}"#,
            w = W,
            h = H,
            below = layer(BELOW_LAYER, &|_| 1),
            world = layer(WORLD_LAYER, &|x| if x == 20 { 2 } else { 0 }),
            above = layer(ABOVE_LAYER, &|_| 0),
            objects = objects,
            tileset = TILESET,
        )
    }

    const SPAWN: &str = r#"{ "name": "Spawn Point", "x": 100, "y": 100 }"#;
    const START: &str = r#"{ "name": "start", "x": 64, "y": 64, "width": 96, "height": 96 }"#;
    const RAMEN_OBJ: &str = r#"{ "name": "ramen", "x": 400, "y": 64, "width": 64, "height": 128 }"#;

    fn loaded(objects: &[&str]) -> (MemoryWalk, EngineContext) {
        let mut game = MemoryWalk::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        game.load_world(&mut ctx, &map_json(&objects.join(","))).unwrap();
        (game, ctx)
    }

    fn step(game: &mut MemoryWalk, ctx: &mut EngineContext, input: &[InputEvent]) {
        let mut queue = InputQueue::new();
        for event in input {
            queue.push(*event);
        }
        ctx.clock.advance(DT);
        game.update(ctx, &queue);
    }

    fn count_events(ctx: &EngineContext, kind: EventKind) -> usize {
        ctx.events.iter().filter(|e| e.kind == kind.as_f32()).count()
    }

    fn avatar(game: &MemoryWalk) -> &Avatar {
        &game.engine().unwrap().avatar
    }

    #[test]
    fn world_load_builds_layers_avatar_and_zones() {
        let (game, ctx) = loaded(&[SPAWN, START, RAMEN_OBJ]);
        assert_eq!(ctx.tilemaps.len(), 3);
        assert_eq!(ctx.camera.bounds, Some(Rect::new(0.0, 0.0, 1280.0, 960.0)));
        assert_eq!(avatar(&game).pos, Vec2::new(100.0, 100.0));
        assert_eq!(ctx.scene.find_by_tag(AVATAR_TAG).unwrap().scale, Vec2::new(32.0, 64.0));
        assert!(ctx.scene.iter().any(|e| e.tag == HELP_TAG && e.layer == RenderLayer::Ui));

        let engine = game.engine().unwrap();
        assert!(engine.zones.intro().is_some());
        assert_eq!(engine.zones.info().len(), 1);
    }

    #[test]
    fn missing_spawn_point_uses_default() {
        let (game, _) = loaded(&[RAMEN_OBJ]);
        assert_eq!(avatar(&game).pos, DEFAULT_SPAWN);
    }

    #[test]
    fn intro_locks_movement_then_releases() {
        let (mut game, mut ctx) = loaded(&[SPAWN, START, RAMEN_OBJ]);

        step(&mut game, &mut ctx, &[]);
        assert_eq!(count_events(&ctx, EventKind::IntroStarted), 1);
        assert!(ctx.overlay.visible);
        assert!(avatar(&game).is_movement_locked());

        step(&mut game, &mut ctx, &[InputEvent::key_down(DirectionKey::Right)]);
        let start = avatar(&game).pos;
        let mut steps = 0;
        while count_events(&ctx, EventKind::IntroFinished) == 0 {
            step(&mut game, &mut ctx, &[]);
            assert_eq!(avatar(&game).pos, start);
            steps += 1;
            assert!(steps < 400, "intro never finished");
        }
        assert_eq!(ctx.overlay.text, "");
        assert!(!ctx.overlay.visible);
        assert_eq!(count_events(&ctx, EventKind::IntroStarted), 1);

        step(&mut game, &mut ctx, &[]);
        assert!(avatar(&game).pos.x > start.x);
    }

    #[test]
    fn intro_text_reveals_on_the_overlay() {
        let (mut game, mut ctx) = loaded(&[SPAWN, START]);
        let mut longest = 0;
        for _ in 0..120 {
            step(&mut game, &mut ctx, &[]);
            let intro = &game.config.dialog.intro_message;
            assert!(intro.starts_with(&ctx.overlay.text));
            longest = longest.max(ctx.overlay.text.len());
        }
        assert!(longest > 10);
    }

    #[test]
    fn overlay_tracks_zone_overlap_every_step() {
        let (mut game, mut ctx) = loaded(&[SPAWN, RAMEN_OBJ]);
        let mut entered = false;
        let mut left = false;
        step(&mut game, &mut ctx, &[InputEvent::key_down(DirectionKey::Right)]);
        for _ in 0..200 {
            step(&mut game, &mut ctx, &[]);
            let inside = avatar(&game).bounding_box().overlaps(&RAMEN);
            assert_eq!(ctx.overlay.visible, inside);
            if inside {
                entered = true;
                assert!(ZONE_MESSAGES[2].1.starts_with(&ctx.overlay.text));
            } else if entered {
                left = true;
                assert_eq!(ctx.overlay.text, "");
            }
        }
        assert!(entered && left);
        assert_eq!(count_events(&ctx, EventKind::DialogShown), 1);
    }

    #[test]
    fn standing_in_a_zone_shows_once() {
        let spawn_in_ramen = r#"{ "name": "Spawn Point", "x": 430, "y": 110 }"#;
        let (mut game, mut ctx) = loaded(&[spawn_in_ramen, RAMEN_OBJ]);
        for _ in 0..300 {
            step(&mut game, &mut ctx, &[]);
        }
        assert_eq!(count_events(&ctx, EventKind::DialogShown), 1);
        assert_eq!(count_events(&ctx, EventKind::RevealComplete), 1);
        assert_eq!(ctx.overlay.text, ZONE_MESSAGES[2].1);
        assert!(ctx.overlay.visible);
    }

    #[test]
    fn wall_tiles_stop_the_avatar() {
        let (mut game, mut ctx) = loaded(&[SPAWN]);
        step(&mut game, &mut ctx, &[InputEvent::key_down(DirectionKey::Right)]);
        for _ in 0..400 {
            step(&mut game, &mut ctx, &[]);
        }
        let right = avatar(&game).bounding_box().max().x;
        assert!(right <= 642.0, "walked through the wall: {}", right);
        assert!(right > 600.0);
    }

    #[test]
    fn tap_walks_to_the_world_point() {
        let (mut game, mut ctx) = loaded(&[SPAWN]);
        let target = Vec2::new(300.0, 260.0);
        let screen = ctx.camera.world_to_screen(target);
        step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::pointer_down(screen.x, screen.y, 0.0),
                InputEvent::pointer_up(screen.x, screen.y, 50.0),
            ],
        );
        for _ in 0..300 {
            step(&mut game, &mut ctx, &[]);
        }
        assert!(avatar(&game).pos.distance(target) <= 6.5, "ended at {:?}", avatar(&game).pos);
    }

    #[test]
    fn failed_reload_keeps_previous_world() {
        let (mut game, mut ctx) = loaded(&[SPAWN, RAMEN_OBJ]);
        step(&mut game, &mut ctx, &[InputEvent::key_down(DirectionKey::Down)]);
        step(&mut game, &mut ctx, &[]);
        let pos = avatar(&game).pos;

        let no_world_layer = map_json(SPAWN).replace(r#""name": "World""#, r#""name": "Walls""#);
        let err = game.load_world(&mut ctx, &no_world_layer).unwrap_err();
        assert!(matches!(err, WorldError::MissingLayer(name) if name == WORLD_LAYER));
        assert!(matches!(game.load_world(&mut ctx, "{"), Err(WorldError::Json(_))));

        assert_eq!(avatar(&game).pos, pos);
        assert_eq!(ctx.tilemaps.len(), 3);
        assert_eq!(ctx.scene.iter().filter(|e| e.tag == AVATAR_TAG).count(), 1);
    }

    #[test]
    fn reload_replaces_the_avatar() {
        let (mut game, mut ctx) = loaded(&[SPAWN]);
        let moved = r#"{ "name": "Spawn Point", "x": 300, "y": 300 }"#;
        game.load_world(&mut ctx, &map_json(moved)).unwrap();
        assert_eq!(avatar(&game).pos, Vec2::new(300.0, 300.0));
        let avatars: Vec<_> = ctx.scene.iter().filter(|e| e.tag == AVATAR_TAG).collect();
        assert_eq!(avatars.len(), 1);
        assert_eq!(avatars[0].pos, Vec2::new(300.0, 300.0));
    }
}
