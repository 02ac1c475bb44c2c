//! Dialog presentation: typewriter reveal, auto-hide and the intro sequence.
//!
//! `DialogMachine` is the only writer of the two presentation surfaces
//! (the in-world panel and the page overlay). Both always carry the same
//! text and visibility. Timing runs on `TimerSlots`, one slot per
//! `DialogTimer` role, and timers are only acted on from `tick`.
//!
//! Usage:
//!   dialog.show("Ramen: ...", ShowOptions::persistent(), now_ms);
//!   dialog.tick(now_ms, &mut avatar);   // once per step, after show/hide
//!   for event in dialog.drain_events() { ... }

use crate::components::avatar::Avatar;
use crate::core::timer::{TimerRole, TimerSlots};
use crate::interaction::config::DialogConfig;

/// Timer roles owned by the dialog machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTimer {
    /// Repeating, one character per firing.
    Reveal,
    /// One-shot, hides a fully revealed message.
    AutoHide,
    /// One-shot, ends the intro hold.
    IntroResume,
}

impl TimerRole for DialogTimer {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Idle,
    /// Typewriter in progress; `chars_shown` characters are on screen.
    Revealing { message: String, chars_shown: usize },
    /// Fully revealed, stays up until hidden.
    Shown { message: String },
    /// Fully revealed, auto-hide timer armed.
    Holding { message: String },
}

impl DialogState {
    /// The message being shown, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DialogState::Idle => None,
            DialogState::Revealing { message, .. }
            | DialogState::Shown { message }
            | DialogState::Holding { message } => Some(message),
        }
    }
}

/// What one presentation surface currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceState {
    pub text: String,
    pub visible: bool,
    /// Bumped on every change, so pollers can skip unchanged frames.
    pub revision: u32,
}

impl SurfaceState {
    fn set(&mut self, text: &str, visible: bool) {
        if self.text != text || self.visible != visible {
            self.text.clear();
            self.text.push_str(text);
            self.visible = visible;
            self.revision = self.revision.wrapping_add(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShowOptions {
    /// Hide this long after the reveal completes. `None` keeps the text up.
    pub auto_hide_ms: Option<f64>,
    /// Tag reported with `DialogEvent::RevealComplete`.
    pub on_complete: Option<u32>,
}

impl ShowOptions {
    /// Stays visible until explicitly hidden. Used for zone dialog.
    pub fn persistent() -> Self {
        Self::default()
    }

    pub fn auto_hide(ms: f64) -> Self {
        Self {
            auto_hide_ms: Some(ms),
            on_complete: None,
        }
    }

    pub fn with_on_complete(mut self, tag: u32) -> Self {
        self.on_complete = Some(tag);
        self
    }
}

/// Notifications produced by the machine, drained by the caller each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// A message started revealing.
    Shown { chars: usize },
    /// Both surfaces were cleared.
    Hidden,
    /// The typewriter finished. Fires exactly once per reveal.
    RevealComplete { tag: Option<u32> },
    IntroStarted,
    IntroFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum IntroPhase {
    #[default]
    NotStarted,
    Revealing,
    Holding,
    Done,
}

/// Dialog lifecycle and the two presentation surfaces it drives.
#[derive(Debug, Clone)]
pub struct DialogMachine {
    config: DialogConfig,
    state: DialogState,
    options: ShowOptions,
    timers: TimerSlots<DialogTimer>,
    intro: IntroPhase,
    panel: SurfaceState,
    overlay: SurfaceState,
    events: Vec<DialogEvent>,
}

impl DialogMachine {
    pub fn new(config: DialogConfig) -> Self {
        Self {
            config,
            state: DialogState::Idle,
            options: ShowOptions::default(),
            timers: TimerSlots::new(),
            intro: IntroPhase::NotStarted,
            panel: SurfaceState::default(),
            overlay: SurfaceState::default(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn panel(&self) -> &SurfaceState {
        &self.panel
    }

    pub fn overlay(&self) -> &SurfaceState {
        &self.overlay
    }

    pub fn timers(&self) -> &TimerSlots<DialogTimer> {
        &self.timers
    }

    /// True from `start_intro` until the intro hold has elapsed.
    pub fn intro_active(&self) -> bool {
        matches!(self.intro, IntroPhase::Revealing | IntroPhase::Holding)
    }

    /// True once the intro has run (or is running).
    pub fn intro_started(&self) -> bool {
        self.intro != IntroPhase::NotStarted
    }

    /// Start revealing `message`.
    ///
    /// Ignored while the intro runs, and when `message` is already the one
    /// being revealed or shown. A different message replaces the current one
    /// and cancels its timers. Returns whether anything changed.
    pub fn show(&mut self, message: &str, options: ShowOptions, now_ms: f64) -> bool {
        if self.intro_active() {
            log::debug!("show suppressed during intro");
            return false;
        }
        if self.state.message() == Some(message) {
            return false;
        }
        self.begin_reveal(message, options, now_ms);
        true
    }

    /// Cancel every dialog timer and clear both surfaces.
    ///
    /// Ignored while the intro runs. Returns whether anything changed.
    pub fn hide(&mut self) -> bool {
        if self.intro_active() {
            log::debug!("hide suppressed during intro");
            return false;
        }
        self.clear()
    }

    /// Run the one-time intro: lock the avatar and reveal the intro message.
    /// The intro hold starts once the reveal completes. Returns false if the
    /// intro already ran or is running.
    pub fn start_intro(&mut self, avatar: &mut Avatar, now_ms: f64) -> bool {
        if self.intro != IntroPhase::NotStarted {
            return false;
        }
        self.clear();
        avatar.lock_movement();
        self.intro = IntroPhase::Revealing;
        self.events.push(DialogEvent::IntroStarted);
        log::debug!("intro started");
        let message = self.config.intro_message.clone();
        self.begin_reveal(&message, ShowOptions::default(), now_ms);
        true
    }

    /// Fire every timer due at `now_ms`, in due order.
    pub fn tick(&mut self, now_ms: f64, avatar: &mut Avatar) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            match fired.role {
                DialogTimer::Reveal => self.reveal_next(fired.due_ms),
                DialogTimer::AutoHide => {
                    if matches!(self.state, DialogState::Holding { .. }) {
                        self.clear();
                    }
                }
                DialogTimer::IntroResume => {
                    self.intro = IntroPhase::Done;
                    avatar.unlock_movement();
                    self.clear();
                    self.events.push(DialogEvent::IntroFinished);
                    log::debug!("intro finished");
                }
            }
        }
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.events)
    }

    fn begin_reveal(&mut self, message: &str, options: ShowOptions, now_ms: f64) {
        self.timers.cancel(DialogTimer::AutoHide);
        self.options = options;
        self.state = DialogState::Revealing {
            message: message.to_string(),
            chars_shown: 0,
        };
        self.set_surfaces("", true);
        let chars = message.chars().count();
        self.events.push(DialogEvent::Shown { chars });
        if chars == 0 {
            self.timers.cancel(DialogTimer::Reveal);
            self.complete_reveal(now_ms);
        } else {
            self.timers
                .schedule_repeating(DialogTimer::Reveal, now_ms, self.config.char_interval_ms);
        }
    }

    fn reveal_next(&mut self, at_ms: f64) {
        let DialogState::Revealing { message, chars_shown } = &mut self.state else {
            self.timers.cancel(DialogTimer::Reveal);
            return;
        };
        *chars_shown += 1;
        let shown: String = message.chars().take(*chars_shown).collect();
        let done = *chars_shown >= message.chars().count();
        self.set_surfaces(&shown, true);
        if done {
            self.timers.cancel(DialogTimer::Reveal);
            self.complete_reveal(at_ms);
        }
    }

    /// The reveal reached the end of the message at `at_ms`.
    fn complete_reveal(&mut self, at_ms: f64) {
        let message = match std::mem::take(&mut self.state) {
            DialogState::Revealing { message, .. } => message,
            other => {
                self.state = other;
                return;
            }
        };
        self.events.push(DialogEvent::RevealComplete {
            tag: self.options.on_complete,
        });

        if self.intro == IntroPhase::Revealing {
            self.intro = IntroPhase::Holding;
            self.timers
                .schedule_once(DialogTimer::IntroResume, at_ms, self.config.intro_hold_ms);
            self.state = DialogState::Shown { message };
        } else if let Some(delay) = self.options.auto_hide_ms {
            self.timers.schedule_once(DialogTimer::AutoHide, at_ms, delay);
            self.state = DialogState::Holding { message };
        } else {
            self.state = DialogState::Shown { message };
        }
    }

    fn clear(&mut self) -> bool {
        self.timers.cancel_all();
        let was_showing = self.state != DialogState::Idle || self.panel.visible;
        self.state = DialogState::Idle;
        self.options = ShowOptions::default();
        self.set_surfaces("", false);
        if was_showing {
            self.events.push(DialogEvent::Hidden);
        }
        was_showing
    }

    fn set_surfaces(&mut self, text: &str, visible: bool) {
        self.panel.set(text, visible);
        self.overlay.set(text, visible);
    }
}

impl Default for DialogMachine {
    fn default() -> Self {
        Self::new(DialogConfig::default())
    }
}
