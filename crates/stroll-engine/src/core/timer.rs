//! Cooperative timers driven by the tick clock.
//!
//! Each timer lives in a slot owned by its role. Scheduling a role replaces
//! whatever that role had pending, so at most one timer per role can be
//! alive. Timers never run code themselves: the owner polls `pop_due` each
//! step and reacts to the roles that come back, which means a cancelled
//! timer has no way to fire later.
//!
//! Usage:
//!   let mut timers = TimerSlots::<MyRole>::new();
//!   timers.schedule_repeating(MyRole::Blink, clock.now_ms(), 60.0);
//!   while let Some(fired) = timers.pop_due(clock.now_ms()) { ... }

use std::fmt::Debug;

/// Smallest allowed repeat interval. Guards `pop_due` against spinning.
pub const MIN_INTERVAL_MS: f64 = 1.0;

/// A closed set of timer roles. Each role owns exactly one slot.
pub trait TimerRole: Copy + Eq + Debug {
    /// Number of roles (slot count).
    const COUNT: usize;
    /// Stable slot index in `0..COUNT`.
    fn index(self) -> usize;
}

/// Identifies one particular scheduling of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle<K> {
    pub role: K,
    generation: u64,
}

/// A timer that came due during `pop_due`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerFired<K> {
    pub role: K,
    pub handle: TimerHandle<K>,
    /// The time the timer was due, which may be earlier than `now`.
    pub due_ms: f64,
    /// True when the timer stays armed for another round.
    pub repeating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scheduled<K> {
    role: K,
    due_ms: f64,
    interval_ms: Option<f64>,
    generation: u64,
}

/// Single-owner timer slots, one per role.
#[derive(Debug, Clone)]
pub struct TimerSlots<K: TimerRole> {
    slots: Vec<Option<Scheduled<K>>>,
    next_generation: u64,
}

impl<K: TimerRole> TimerSlots<K> {
    pub fn new() -> Self {
        Self {
            slots: vec![None; K::COUNT],
            next_generation: 1,
        }
    }

    /// Cancel any pending `role` timer, then schedule a one-shot `delay_ms` from `now_ms`.
    pub fn schedule_once(&mut self, role: K, now_ms: f64, delay_ms: f64) -> TimerHandle<K> {
        self.arm(role, now_ms + delay_ms.max(0.0), None)
    }

    /// Cancel any pending `role` timer, then schedule a repeating timer whose
    /// first firing is one interval from `now_ms`.
    pub fn schedule_repeating(&mut self, role: K, now_ms: f64, interval_ms: f64) -> TimerHandle<K> {
        let interval = interval_ms.max(MIN_INTERVAL_MS);
        self.arm(role, now_ms + interval, Some(interval))
    }

    fn arm(&mut self, role: K, due_ms: f64, interval_ms: Option<f64>) -> TimerHandle<K> {
        let generation = self.next_generation;
        self.next_generation += 1;
        // Replacing the slot is the cancellation of the previous timer.
        self.slots[role.index()] = Some(Scheduled {
            role,
            due_ms,
            interval_ms,
            generation,
        });
        TimerHandle { role, generation }
    }

    /// Cancel the pending timer for `role`. Returns true if one was pending.
    pub fn cancel(&mut self, role: K) -> bool {
        self.slots[role.index()].take().is_some()
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.slots.fill(None);
    }

    pub fn is_scheduled(&self, role: K) -> bool {
        self.slots[role.index()].is_some()
    }

    /// Whether `handle` still refers to the pending timer of its role.
    pub fn is_current(&self, handle: TimerHandle<K>) -> bool {
        self.slots[handle.role.index()]
            .map(|s| s.generation == handle.generation)
            .unwrap_or(false)
    }

    /// When the pending `role` timer fires next, if any.
    pub fn due_at(&self, role: K) -> Option<f64> {
        self.slots[role.index()].map(|s| s.due_ms)
    }

    /// Number of roles with a pending timer.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Take the earliest timer due at or before `now_ms`.
    ///
    /// One-shot timers leave their slot; repeating timers are re-armed one
    /// interval after their previous due time. Ties go to the lower role index.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<TimerFired<K>> {
        let mut best: Option<Scheduled<K>> = None;
        for slot in self.slots.iter().flatten() {
            if slot.due_ms > now_ms {
                continue;
            }
            if best.map_or(true, |b| slot.due_ms < b.due_ms) {
                best = Some(*slot);
            }
        }
        let fired = best?;
        let slot = &mut self.slots[fired.role.index()];
        match fired.interval_ms {
            Some(interval) => {
                if let Some(s) = slot.as_mut() {
                    s.due_ms += interval;
                }
            }
            None => *slot = None,
        }
        Some(TimerFired {
            role: fired.role,
            handle: TimerHandle {
                role: fired.role,
                generation: fired.generation,
            },
            due_ms: fired.due_ms,
            repeating: fired.interval_ms.is_some(),
        })
    }
}

impl<K: TimerRole> Default for TimerSlots<K> {
    fn default() -> Self {
        Self::new()
    }
}
