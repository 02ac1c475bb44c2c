use glam::Vec2;

/// One of the four movement directions a key can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    Left,
    Right,
    Up,
    Down,
}

impl DirectionKey {
    pub const ALL: [DirectionKey; 4] = [
        DirectionKey::Left,
        DirectionKey::Right,
        DirectionKey::Up,
        DirectionKey::Down,
    ];

    /// Map a DOM `keyCode` to a direction. Arrow keys and WASD.
    pub fn from_code(key_code: u32) -> Option<Self> {
        match key_code {
            37 | 65 => Some(DirectionKey::Left),
            38 | 87 => Some(DirectionKey::Up),
            39 | 68 => Some(DirectionKey::Right),
            40 | 83 => Some(DirectionKey::Down),
            _ => None,
        }
    }

    /// Unit vector in Y-down world space.
    pub fn vector(self) -> Vec2 {
        match self {
            DirectionKey::Left => Vec2::new(-1.0, 0.0),
            DirectionKey::Right => Vec2::new(1.0, 0.0),
            DirectionKey::Up => Vec2::new(0.0, -1.0),
            DirectionKey::Down => Vec2::new(0.0, 1.0),
        }
    }

    /// The arrow-key code for this direction.
    pub fn arrow_code(self) -> u32 {
        match self {
            DirectionKey::Left => 37,
            DirectionKey::Up => 38,
            DirectionKey::Right => 39,
            DirectionKey::Down => 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Up,
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A direction key was pressed or released. `code` is the raw key code,
    /// so two keys mapped to the same direction are tracked apart.
    Key { key: DirectionKey, code: u32, edge: KeyEdge },
    /// A touch/click began or ended at screen coordinates (x, y).
    /// `t_ms` is the page's timestamp for the event.
    Pointer { phase: PointerPhase, x: f32, y: f32, t_ms: f64 },
    /// The page lost focus; key-up and pointer-up events may never arrive.
    FocusLost,
}

impl InputEvent {
    /// Key event from a raw key code. `None` for keys that are not directions.
    pub fn key(code: u32, edge: KeyEdge) -> Option<Self> {
        DirectionKey::from_code(code).map(|key| InputEvent::Key { key, code, edge })
    }

    pub fn key_down(key: DirectionKey) -> Self {
        InputEvent::Key { key, code: key.arrow_code(), edge: KeyEdge::Down }
    }

    pub fn key_up(key: DirectionKey) -> Self {
        InputEvent::Key { key, code: key.arrow_code(), edge: KeyEdge::Up }
    }

    pub fn pointer_down(x: f32, y: f32, t_ms: f64) -> Self {
        InputEvent::Pointer { phase: PointerPhase::Down, x, y, t_ms }
    }

    pub fn pointer_up(x: f32, y: f32, t_ms: f64) -> Self {
        InputEvent::Pointer { phase: PointerPhase::Up, x, y, t_ms }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Push a key event from a raw key code. Unmapped keys are dropped.
    pub fn push_key(&mut self, key_code: u32, edge: KeyEdge) {
        if let Some(event) = InputEvent::key(key_code, edge) {
            self.events.push(event);
        }
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
