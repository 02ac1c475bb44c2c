use glam::Vec2;
use crate::api::types::{EventKind, GameEvent};
use crate::components::avatar::Avatar;
use crate::input::queue::InputEvent;
use crate::input::translator::InputTranslator;
use crate::interaction::config::InteractionConfig;
use crate::interaction::dialog::{DialogEvent, DialogMachine};
use crate::interaction::motion::{MotionResolver, MotionSubstrate, PoseCommand};
use crate::interaction::orchestrator::{Decision, Orchestrator};
use crate::interaction::zones::ZoneSet;

/// What happened during one `InteractionEngine::step`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub pose: PoseCommand,
    pub decision: Decision,
    pub events: Vec<DialogEvent>,
}

/// One world session of the movement-and-dialog core: the avatar, its
/// intent, the zones and the dialog machine.
///
/// Within `step` the order is fixed: input, motion, substrate advance,
/// zone test, dialog show/hide, dialog timers.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    pub avatar: Avatar,
    pub zones: ZoneSet,
    pub translator: InputTranslator,
    pub motion: MotionResolver,
    pub dialog: DialogMachine,
    pub orchestrator: Orchestrator,
}

impl InteractionEngine {
    pub fn new(config: &InteractionConfig, avatar: Avatar, zones: ZoneSet) -> Self {
        Self {
            avatar,
            zones,
            translator: InputTranslator::new(config.gestures),
            motion: MotionResolver::new(config.motion),
            dialog: DialogMachine::new(config.dialog.clone()),
            orchestrator: Orchestrator::new(),
        }
    }

    /// Advance the session by one fixed step ending at `now_ms`.
    ///
    /// `to_world` converts pointer screen coordinates into world space.
    pub fn step<S>(
        &mut self,
        input: &[InputEvent],
        to_world: impl Fn(Vec2) -> Vec2,
        substrate: &mut S,
        dt: f32,
        now_ms: f64,
    ) -> StepReport
    where
        S: MotionSubstrate + ?Sized,
    {
        for event in input {
            if let Some(intent) = self.translator.translate(event, self.avatar.pos, &to_world) {
                self.motion.set_intent(intent);
            }
        }

        let pose = self.motion.resolve(&mut self.avatar);
        substrate.advance(&mut self.avatar, dt);

        let decision = self
            .orchestrator
            .step(&mut self.zones, &mut self.dialog, &mut self.avatar, now_ms);
        self.dialog.tick(now_ms, &mut self.avatar);

        StepReport {
            pose,
            decision,
            events: self.dialog.drain_events(),
        }
    }
}

/// Wire form of a dialog event.
pub fn dialog_event_to_game_event(event: DialogEvent) -> GameEvent {
    match event {
        DialogEvent::Shown { chars } => {
            GameEvent::new(EventKind::DialogShown).with_payload(chars as f32, 0.0, 0.0)
        }
        DialogEvent::Hidden => GameEvent::new(EventKind::DialogHidden),
        DialogEvent::RevealComplete { tag } => GameEvent::new(EventKind::RevealComplete)
            .with_payload(tag.map_or(-1.0, |t| t as f32), 0.0, 0.0),
        DialogEvent::IntroStarted => GameEvent::new(EventKind::IntroStarted),
        DialogEvent::IntroFinished => GameEvent::new(EventKind::IntroFinished),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::input::queue::DirectionKey;
    use crate::interaction::motion::FreeMotion;
    use crate::interaction::zones::TriggerZone;

    const DT: f32 = 1.0 / 60.0;

    fn engine() -> InteractionEngine {
        let mut zones = ZoneSet::new()
            .with_intro(TriggerZone::new("start", Rect::new(0.0, 0.0, 200.0, 200.0)));
        zones.push_info(TriggerZone::new("bonchon", Rect::new(600.0, 0.0, 100.0, 400.0)).with_message("Wings"));
        InteractionEngine::new(
            &InteractionConfig::default(),
            Avatar::new(Vec2::new(100.0, 100.0)),
            zones,
        )
    }

    #[test]
    fn intro_locks_input_until_hold_elapses() {
        let mut eng = engine();
        let mut now = 0.0;
        let mut step = |eng: &mut InteractionEngine, input: &[InputEvent]| {
            now += DT as f64 * 1000.0;
            eng.step(input, |p| p, &mut FreeMotion, DT, now)
        };

        let report = step(&mut eng, &[]);
        assert_eq!(report.decision, Decision::StartIntro);
        assert!(report.events.contains(&DialogEvent::IntroStarted));
        assert!(eng.avatar.is_movement_locked());

        // keys pressed during the intro do not move the avatar
        step(&mut eng, &[InputEvent::key_down(DirectionKey::Right)]);
        let start = eng.avatar.pos;
        let mut finished = false;
        for _ in 0..400 {
            let report = step(&mut eng, &[]);
            if report.events.contains(&DialogEvent::IntroFinished) {
                finished = true;
                break;
            }
            assert_eq!(eng.avatar.velocity, Vec2::ZERO);
        }
        assert!(finished);
        assert_eq!(eng.avatar.pos, start);
        assert!(!eng.avatar.is_movement_locked());

        // the held key takes effect once unlocked
        let report = step(&mut eng, &[]);
        assert_eq!(report.pose, PoseCommand::Walk(crate::components::avatar::Facing::Right));
        assert!(eng.avatar.pos.x > start.x);
    }

    #[test]
    fn walking_into_a_zone_shows_and_leaving_hides() {
        let mut eng = engine();
        eng.zones = {
            let mut zones = ZoneSet::new();
            zones.push_info(TriggerZone::new("bonchon", Rect::new(150.0, 0.0, 100.0, 400.0)).with_message("Wings"));
            zones
        };
        let mut now = 0.0;
        let mut shown_steps = 0;
        let mut hidden_events = 0;
        eng.motion.set_intent(crate::input::translator::MovementIntent::Directional(Vec2::X));
        for _ in 0..120 {
            now += 1000.0 / 60.0;
            let report = eng.step(&[], |p| p, &mut FreeMotion, DT, now);
            if report.events.iter().any(|e| matches!(e, DialogEvent::Shown { .. })) {
                shown_steps += 1;
            }
            if report.events.contains(&DialogEvent::Hidden) {
                hidden_events += 1;
                assert!(!eng.dialog.panel().visible);
                assert!(!eng.dialog.overlay().visible);
            }
        }
        assert_eq!(shown_steps, 1);
        assert_eq!(hidden_events, 1);
        assert!(eng.avatar.pos.x > 300.0);
    }

    #[test]
    fn swipe_replaces_a_pending_target() {
        use crate::input::translator::MovementIntent;

        let mut eng = engine();
        eng.zones = ZoneSet::new();
        let mut now = 0.0;
        let tap = [
            InputEvent::pointer_down(300.0, 180.0, 0.0),
            InputEvent::pointer_up(300.0, 180.0, 40.0),
        ];
        eng.step(&tap, |p| p, &mut FreeMotion, DT, now);
        for _ in 0..10 {
            now += 1000.0 / 60.0;
            eng.step(&[], |p| p, &mut FreeMotion, DT, now);
        }
        assert!(matches!(eng.motion.intent(), MovementIntent::TargetPoint { .. }));
        let before = eng.avatar.pos;
        assert!(before.x > 100.0);

        // a slow drag to the left is still a swipe
        now += 1000.0 / 60.0;
        let swipe = [
            InputEvent::pointer_down(400.0, 400.0, now),
            InputEvent::pointer_up(340.0, 410.0, now + 900.0),
        ];
        eng.step(&swipe, |p| p, &mut FreeMotion, DT, now);
        assert_eq!(eng.motion.intent(), MovementIntent::Directional(Vec2::new(-1.0, 0.0)));

        for _ in 0..30 {
            now += 1000.0 / 60.0;
            eng.step(&[], |p| p, &mut FreeMotion, DT, now);
            assert!(eng.avatar.velocity.x < 0.0);
            assert_eq!(eng.avatar.velocity.y, 0.0);
        }
        assert!(eng.avatar.pos.x < before.x);
        assert_eq!(eng.avatar.pos.y, before.y);
    }

    #[test]
    fn tap_target_is_reached() {
        let mut eng = engine();
        eng.zones = ZoneSet::new();
        let mut now = 0.0;
        let tap = [
            InputEvent::pointer_down(300.0, 180.0, 0.0),
            InputEvent::pointer_up(300.0, 180.0, 40.0),
        ];
        eng.step(&tap, |p| p, &mut FreeMotion, DT, now);
        for _ in 0..200 {
            now += 1000.0 / 60.0;
            eng.step(&[], |p| p, &mut FreeMotion, DT, now);
        }
        assert!(eng.avatar.pos.distance(Vec2::new(300.0, 180.0)) <= 6.0);
        assert_eq!(eng.avatar.velocity, Vec2::ZERO);
    }

    #[test]
    fn events_encode_for_the_wire() {
        let ev = dialog_event_to_game_event(DialogEvent::RevealComplete { tag: None });
        assert_eq!(ev.kind, EventKind::RevealComplete.as_f32());
        assert_eq!(ev.a, -1.0);
        let ev = dialog_event_to_game_event(DialogEvent::Shown { chars: 12 });
        assert_eq!(ev.a, 12.0);
    }
}
