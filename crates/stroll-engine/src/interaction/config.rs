use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::core::geometry::Rect;
use crate::renderer::viewport::ZoomPolicy;

/// Tunables for movement, gestures, dialog timing, zoom and the dialog panel.
/// Every field has a default; JSON may override any subset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub motion: MotionConfig,
    pub gestures: GestureConfig,
    pub dialog: DialogConfig,
    pub zoom: ZoomPolicy,
    pub panel: PanelConfig,
}

impl InteractionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Walking speed in world units per second.
    pub speed: f32,
    /// Distance at which a target point (or one axis of it) counts as reached.
    pub arrival_radius: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 175.0,
            arrival_radius: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Taps closer than this to the avatar stop it.
    pub stop_radius: f32,
    /// Minimum pointer travel (screen pixels) for a swipe.
    pub swipe_threshold: f32,
    /// Longest press that still counts as a tap.
    pub max_tap_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            stop_radius: 18.0,
            swipe_threshold: 24.0,
            max_tap_ms: 250.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Delay between revealed characters.
    pub char_interval_ms: f64,
    /// Message revealed by the intro sequence.
    pub intro_message: String,
    /// How long the intro message stays up after it is fully revealed.
    pub intro_hold_ms: f64,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            char_interval_ms: 60.0,
            intro_message: "This is a game of memories".to_string(),
            intro_hold_ms: 1400.0,
        }
    }
}

/// Placement of the in-world dialog panel, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// The panel is only shown on viewports wider than this.
    pub min_viewport_width: f32,
    pub width: f32,
    pub height: f32,
    /// Distance from the left and bottom edges.
    pub margin: f32,
    /// Inner padding around the text.
    pub padding: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 820.0,
            width: 360.0,
            height: 110.0,
            margin: 40.0,
            padding: 10.0,
        }
    }
}

impl PanelConfig {
    /// Panel rectangle for a viewport, or `None` when the viewport is too narrow.
    pub fn layout(&self, viewport: Vec2) -> Option<Rect> {
        if viewport.x <= self.min_viewport_width {
            return None;
        }
        let y = (viewport.y - self.height - self.margin).max(self.margin);
        Some(Rect::new(self.margin, y, self.width, self.height))
    }

    /// Text area inside the panel.
    pub fn text_area(&self, panel: &Rect) -> Rect {
        Rect::new(
            panel.min.x + self.padding,
            panel.min.y + self.padding,
            (panel.size.x - self.padding * 2.0).max(0.0),
            (panel.size.y - self.padding * 2.0).max(0.0),
        )
    }
}
