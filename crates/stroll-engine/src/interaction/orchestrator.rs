use crate::components::avatar::Avatar;
use crate::interaction::dialog::{DialogMachine, ShowOptions};
use crate::interaction::zones::{ZoneHit, ZoneSet};

/// What the orchestrator does with one step's zone result, highest
/// precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The intro zone fired: run the intro sequence.
    StartIntro,
    /// The overlapping info zone changed (possibly to none): hide, then show the new one.
    SwitchZone(Option<usize>),
    /// Still in the same info zone as last step.
    Stay,
    /// Nothing to do: no zone now or before, or the intro owns the dialog.
    Idle,
}

/// Pure decision table over the zone result and the previously reported zone.
pub fn decide(hit: ZoneHit, last_zone: Option<usize>, intro_active: bool) -> Decision {
    match hit {
        ZoneHit::IntroFired => Decision::StartIntro,
        _ if intro_active => Decision::Idle,
        ZoneHit::Info(index) if last_zone == Some(index) => Decision::Stay,
        ZoneHit::Info(index) => Decision::SwitchZone(Some(index)),
        ZoneHit::None if last_zone.is_some() => Decision::SwitchZone(None),
        ZoneHit::None => Decision::Idle,
    }
}

/// Connects zone detection to the dialog machine, once per step.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    last_zone: Option<usize>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The info zone reported by the last step, if any.
    pub fn last_zone(&self) -> Option<usize> {
        self.last_zone
    }

    /// Test zones against the avatar and apply the resulting decision.
    pub fn step(
        &mut self,
        zones: &mut ZoneSet,
        dialog: &mut DialogMachine,
        avatar: &mut Avatar,
        now_ms: f64,
    ) -> Decision {
        let hit = zones.test(&avatar.bounding_box(), dialog.intro_active());
        let decision = decide(hit, self.last_zone, dialog.intro_active());
        match decision {
            Decision::StartIntro => {
                dialog.start_intro(avatar, now_ms);
                self.last_zone = None;
            }
            Decision::Idle => {
                // Forgetting the zone here means the one under the avatar
                // gets shown once the intro ends.
                self.last_zone = None;
            }
            Decision::SwitchZone(next) => {
                dialog.hide();
                if let Some(zone) = next.and_then(|i| zones.info_zone(i)) {
                    log::debug!("entered zone '{}'", zone.name);
                    if let Some(message) = &zone.message {
                        dialog.show(message, ShowOptions::persistent(), now_ms);
                    }
                } else {
                    log::debug!("left zone");
                }
                self.last_zone = next;
            }
            Decision::Stay => {}
        }
        decision
    }
}
