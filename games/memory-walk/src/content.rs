//! Names, messages and skin data for the neighbourhood map.

use glam::Vec2;
use stroll_engine::Facing;

/// Tile layers, back to front.
pub const BELOW_LAYER: &str = "Below Player";
pub const WORLD_LAYER: &str = "World";
pub const ABOVE_LAYER: &str = "Above Player";

pub const OBJECT_LAYER: &str = "Objects";
pub const TILESET: &str = "tuxmon-sample-32px-extruded";

pub const SPAWN_POINT: &str = "Spawn Point";
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(100.0, 100.0);

/// Object that plays the intro when first touched.
pub const INTRO_ZONE: &str = "start";

/// Object zones and what they say, in precedence order.
pub const ZONE_MESSAGES: [(&str, &str); 6] = [
    ("curb1", "Curb: Watch your step—these edges are sneaky."),
    ("alfresco", "Alfresco: Smells of charcoal and indie beats."),
    ("ramen", "Ramen: Slurp-worthy noodles await nearby."),
    ("carig", "Carig: Traffic and neon blur in puddle reflections."),
    ("bonchon", "Bonchon: Crunchy wings call your name."),
    ("flowers", "Flowers: Petals tremble when you walk close."),
];

pub const HELP_TEXT: &str = "Click/tap to move • Swipe to change direction";
pub const HELP_POS: Vec2 = Vec2::new(16.0, 16.0);
pub const HELP_TEXT_SIZE: f32 = 16.0;

/// Manifest sprite stretched behind the dialog panel.
pub const PANEL_SPRITE: &str = "panel";

pub const WALK_ANIMATIONS: [&str; 4] = [
    "misa-left-walk",
    "misa-right-walk",
    "misa-back-walk",
    "misa-front-walk",
];

/// Walk cycle for a moving facing.
pub fn walk_animation(facing: Facing) -> Option<&'static str> {
    match facing {
        Facing::Left => Some(WALK_ANIMATIONS[0]),
        Facing::Right => Some(WALK_ANIMATIONS[1]),
        Facing::Up => Some(WALK_ANIMATIONS[2]),
        Facing::Down => Some(WALK_ANIMATIONS[3]),
        Facing::Idle => None,
    }
}

/// Standing frame for the direction the avatar last walked in.
pub fn idle_frame(facing: Facing) -> &'static str {
    match facing {
        Facing::Left => "misa-left",
        Facing::Right => "misa-right",
        Facing::Up => "misa-back",
        Facing::Down | Facing::Idle => "misa-front",
    }
}
