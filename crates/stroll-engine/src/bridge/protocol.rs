/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_UI_START: usize = 4;
pub const HEADER_WORLD_WIDTH: usize = 5;
pub const HEADER_WORLD_HEIGHT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_PROTOCOL_VERSION: usize = 9;
pub const HEADER_CAMERA_X: usize = 10;
pub const HEADER_CAMERA_Y: usize = 11;
pub const HEADER_ZOOM: usize = 12;
pub const HEADER_OVERLAY_VISIBLE: usize = 13;
pub const HEADER_OVERLAY_REVISION: usize = 14;
pub const HEADER_CLOCK_MS: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per render instance (fixed wire format).
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }
}

/// Per-frame header values. Counts are clamped to the layout capacities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameHeader {
    pub frame: u32,
    pub instance_count: u32,
    pub ui_start: u32,
    pub event_count: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub camera_x: f32,
    pub camera_y: f32,
    pub zoom: f32,
    pub overlay_visible: bool,
    pub overlay_revision: u32,
    pub clock_ms: f64,
}

impl FrameHeader {
    pub fn to_floats(&self, layout: &ProtocolLayout) -> [f32; HEADER_FLOATS] {
        let instance_count = (self.instance_count as usize).min(layout.max_instances);
        let mut h = [0.0; HEADER_FLOATS];
        h[HEADER_LOCK] = 0.0;
        h[HEADER_FRAME_COUNTER] = self.frame as f32;
        h[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        h[HEADER_INSTANCE_COUNT] = instance_count as f32;
        h[HEADER_UI_START] = (self.ui_start as usize).min(instance_count) as f32;
        h[HEADER_WORLD_WIDTH] = self.world_width;
        h[HEADER_WORLD_HEIGHT] = self.world_height;
        h[HEADER_MAX_EVENTS] = layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = (self.event_count as usize).min(layout.max_events) as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_CAMERA_X] = self.camera_x;
        h[HEADER_CAMERA_Y] = self.camera_y;
        h[HEADER_ZOOM] = self.zoom;
        h[HEADER_OVERLAY_VISIBLE] = if self.overlay_visible { 1.0 } else { 0.0 };
        h[HEADER_OVERLAY_REVISION] = self.overlay_revision as f32;
        h[HEADER_CLOCK_MS] = self.clock_ms as f32;
        h
    }
}
