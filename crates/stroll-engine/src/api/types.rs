use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to TypeScript via SharedArrayBuffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: EventKind) -> Self {
        Self {
            kind: kind.as_f32(),
            ..Default::default()
        }
    }

    pub fn with_payload(mut self, a: f32, b: f32, c: f32) -> Self {
        self.a = a;
        self.b = b;
        self.c = c;
        self
    }
}

/// Event kinds the engine itself emits. Games may use values >= 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    /// Dialog started revealing. `a` = message length in chars.
    DialogShown = 1,
    /// Both presentation surfaces were cleared.
    DialogHidden = 2,
    /// Typewriter reached the end of the message. `a` = completion tag (or -1).
    RevealComplete = 3,
    /// The one-time intro sequence began; movement is locked.
    IntroStarted = 4,
    /// The intro hold elapsed; movement is unlocked.
    IntroFinished = 5,
}

impl EventKind {
    pub fn as_f32(self) -> f32 {
        self as u32 as f32
    }
}
