//! # Actions
//!
//! Everything that can happen during a study becomes an `Action`.
//! Subject presses a ring key? That's `Action::ClickRing(id)`.
//! The completion alarm fires? That's `Action::CompletionSignal`.
//!
//! `update()` takes the session and an action, mutates the session, and
//! returns an `Effect` telling the front end what it has to do next. Timers
//! go through the `Alarm` it is handed; no other I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Effect
//! ```

use chrono::Utc;

use crate::core::alarm::Alarm;
use crate::core::director::Advance;
use crate::core::pole::PoleId;
use crate::core::ring::RingId;
use crate::core::rules::Gesture;
use crate::core::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClickRing(RingId),
    ClickPole(PoleId),
    /// The alarm scheduled on level completion went off.
    CompletionSignal,
    /// "Next level" / "Finish study" on the success banner.
    Acknowledge,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Play the rejection shake on this ring.
    Shake(RingId),
    /// A new level's puzzle is in place; drop per-level presentation state.
    LevelChanged,
    /// The last level was acknowledged; the log is final.
    StudyComplete,
    Quit,
}

pub fn update(session: &mut Session, action: Action, alarm: &dyn Alarm) -> Effect {
    match action {
        Action::ClickRing(id) => click(session, Gesture::ClickRing(id), alarm),
        Action::ClickPole(id) => click(session, Gesture::ClickPole(id), alarm),
        Action::CompletionSignal => advance_effect(session.signal()),
        Action::Acknowledge => advance_effect(session.acknowledge()),
        Action::Quit => Effect::Quit,
    }
}

fn click(session: &mut Session, gesture: Gesture, alarm: &dyn Alarm) -> Effect {
    let now = Utc::now().timestamp_millis();
    match session.dispatch(gesture, now, alarm) {
        Some(outcome) => outcome.rejected.map_or(Effect::None, Effect::Shake),
        None => Effect::None,
    }
}

fn advance_effect(advance: Advance) -> Effect {
    match advance {
        Advance::Stay => Effect::None,
        Advance::Next(_) => Effect::LevelChanged,
        Advance::Finished => Effect::StudyComplete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::journal::ErrorKind;
    use crate::test_support::{RecordingAlarm, test_session};

    #[test]
    fn test_quit() {
        let alarm = RecordingAlarm::default();
        let mut session = test_session();
        assert_eq!(update(&mut session, Action::Quit, &alarm), Effect::Quit);
    }

    #[test]
    fn test_push_has_no_effect_but_logs() {
        let alarm = RecordingAlarm::default();
        let mut session = test_session();
        let effect = update(&mut session, Action::ClickRing(RingId(0)), &alarm);
        assert_eq!(effect, Effect::None);
        assert_eq!(session.log().len(), 1);
        assert!(session.log().last().unwrap().timestamp > 0);
    }

    #[test]
    fn test_full_level_cycle_through_update() {
        let alarm = RecordingAlarm::default();
        let mut session = test_session();
        for i in 0..3 {
            update(&mut session, Action::ClickRing(RingId(i)), &alarm);
        }
        assert_eq!(update(&mut session, Action::CompletionSignal, &alarm), Effect::None);
        assert_eq!(update(&mut session, Action::Acknowledge, &alarm), Effect::LevelChanged);

        // LEVEL_2: bottom ring is buried
        let effect = update(&mut session, Action::ClickRing(RingId(0)), &alarm);
        assert_eq!(effect, Effect::Shake(RingId(0)));
        assert_eq!(
            session.log().last().unwrap().error,
            Some(ErrorKind::LifoViolation)
        );
    }

    #[test]
    fn test_acknowledge_without_banner_does_nothing() {
        let alarm = RecordingAlarm::default();
        let mut session = test_session();
        assert_eq!(update(&mut session, Action::Acknowledge, &alarm), Effect::None);
        assert_eq!(session.progress().0, 1);
    }
}
