/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick, in seconds.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Monotonic simulation clock in milliseconds.
///
/// Advanced once per fixed step; every cooperative timer is scheduled
/// against this clock, never against wall time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickClock {
    now_ms: f64,
    ticks: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one step of `dt_secs` seconds. Returns the new time.
    pub fn advance(&mut self, dt_secs: f32) -> f64 {
        self.now_ms += f64::from(dt_secs.max(0.0)) * 1000.0;
        self.ticks += 1;
        self.now_ms
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
