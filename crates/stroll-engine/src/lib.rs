pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod interaction;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, EventKind, GameEvent};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::sprite::{SpriteComponent, AtlasId};
pub use components::avatar::{Avatar, AvatarBody, Facing};
pub use components::animation::{AnimationComponent, AnimationDef};
pub use components::tilemap::{TilemapComponent, Tile};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TickClock};
pub use core::timer::{TimerSlots, TimerHandle, TimerRole};
pub use core::geometry::Rect;
pub use core::collision::CollisionGrid;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::Camera2D;
pub use renderer::viewport::ZoomPolicy;
pub use input::queue::{DirectionKey, InputEvent, InputQueue, KeyEdge, PointerPhase};
pub use input::translator::{InputTranslator, MovementIntent};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use assets::world::{WorldError, WorldMap};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use systems::animation::tick_animations;
pub use systems::panel::DialogPanel;
pub use systems::render::build_render_buffer;
pub use systems::text::FontConfig;
pub use interaction::{
    InteractionConfig, InteractionEngine, StepReport,
    MotionSubstrate, FreeMotion, PoseCommand,
    TriggerZone, ZoneSet, DialogMachine, DialogEvent, ShowOptions, SurfaceState,
    Decision,
};

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsWorld, PhysicsBody, PhysicsSubstrate};
