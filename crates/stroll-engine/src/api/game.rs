use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::SpriteRegistry;
use crate::assets::world::WorldError;
use crate::components::tilemap::TilemapComponent;
use crate::core::scene::Scene;
use crate::core::time::TickClock;
use crate::input::queue::InputQueue;
use crate::interaction::dialog::SurfaceState;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::RenderBuffer;
use crate::renderer::viewport::ZoomPolicy;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units, until a world is loaded.
    pub world_width: f32,
    /// World height in game units, until a world is loaded.
    pub world_height: f32,
    /// Maximum number of render instances (default: 2048).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Viewport width to camera zoom mapping, applied on every resize.
    pub zoom: ZoomPolicy,
    /// Gravity vector for physics simulation. Default: zero (top-down).
    #[cfg(feature = "physics")]
    pub gravity: glam::Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 2048,
            max_events: 32,
            zoom: ZoomPolicy::default(),
            #[cfg(feature = "physics")]
            gravity: glam::Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `ctx.clock` has already been advanced to the end of it.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Called after the camera has been resized and re-zoomed.
    fn resize(&mut self, _ctx: &mut EngineContext, _width: f32, _height: f32) {}

    /// Build the playable world from a Tiled JSON map. On error the game
    /// must keep its previous world.
    fn load_world(&mut self, _ctx: &mut EngineContext, _json: &str) -> Result<(), WorldError> {
        Ok(())
    }

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to the `Game` hooks.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera2D,
    pub clock: TickClock,
    /// Tile layers drawn under and over the scene entities.
    pub tilemaps: Vec<TilemapComponent>,
    pub sprites: SpriteRegistry,
    pub events: Vec<GameEvent>,
    /// Text the page shows in its HTML overlay.
    pub overlay: SurfaceState,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera2D::new(800.0, 600.0),
            clock: TickClock::new(),
            tilemaps: Vec::new(),
            sprites: SpriteRegistry::new(),
            events: Vec::new(),
            overlay: SurfaceState::default(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Closure form of `next_id`, for the text builders.
    pub fn id_gen(&mut self) -> impl FnMut() -> EntityId + '_ {
        move || self.next_id()
    }

    /// The scene together with an ID generator, for systems that spawn
    /// into the scene while allocating IDs.
    pub fn scene_and_ids(&mut self) -> (&mut Scene, impl FnMut() -> EntityId + '_) {
        let next_id = &mut self.next_id;
        let ids = move || {
            let id = EntityId(*next_id);
            *next_id += 1;
            id
        };
        (&mut self.scene, ids)
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Mirror the dialog overlay surface. Only copies on a new revision.
    pub fn set_overlay(&mut self, surface: &SurfaceState) {
        if self.overlay.revision != surface.revision {
            self.overlay.clone_from(surface);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub camera: &'a Camera2D,
}
