// interaction/mod.rs
//
// The movement-and-dialog core: motion from intents, trigger zones, the
// dialog state machine and the orchestrator that ties them together.
// Independent of rendering; talks to the world through `MotionSubstrate`.

pub mod config;
pub mod motion;
pub mod zones;
pub mod dialog;
pub mod orchestrator;
pub mod engine;

pub use config::{InteractionConfig, MotionConfig, GestureConfig, DialogConfig, PanelConfig};
pub use motion::{MotionResolver, MotionSubstrate, FreeMotion, PoseCommand};
pub use zones::{TriggerZone, ZoneSet, ZoneHit};
pub use dialog::{DialogMachine, DialogState, DialogTimer, DialogEvent, SurfaceState, ShowOptions};
pub use orchestrator::{Orchestrator, Decision, decide};
pub use engine::{InteractionEngine, StepReport, dialog_event_to_game_event};
