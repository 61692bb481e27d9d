//! # Action Processor
//!
//! `process(puzzle, level, gesture, at)` is the pure heart of the study:
//!
//! ```text
//! PuzzleState + Gesture  →  behavior.judge()  →  Verdict
//!                                                  │
//!                         apply to a copy  ←───────┘
//!                                │
//!                  Transition { next, event, completed, rejected }
//! ```
//!
//! Nothing here touches the session or the clock; the caller supplies the
//! timestamp and decides what to do with the transition.

use uuid::Uuid;

use crate::core::journal::{ActionKind, LogEvent};
use crate::core::level::LevelDef;
use crate::core::puzzle::PuzzleState;
use crate::core::ring::RingId;
use crate::core::rules::{Gesture, ProcessAction, Verdict};

#[derive(Debug, Clone)]
pub struct Transition {
    pub next: PuzzleState,
    /// `None` only for selection toggles, which change no stack.
    pub event: Option<LogEvent>,
    pub completed: bool,
    /// Ring whose action was refused; the front end shakes it.
    pub rejected: Option<RingId>,
}

/// Judge and apply one gesture. Returns `None` when the gesture is not an
/// action on this level (unknown ids included).
pub fn process(
    puzzle: &PuzzleState,
    level: &LevelDef,
    gesture: Gesture,
    at: i64,
) -> Option<Transition> {
    let verdict = level.behavior.judge(puzzle, gesture)?;
    let mut next = puzzle.clone();

    if let Err(reason) = apply(&mut next, &verdict) {
        log::error!("{} refused {:?}: {}", level.id, verdict, reason);
        return None;
    }

    let stamp = |action: ActionKind, ring: Option<RingId>| LogEvent {
        id: Uuid::new_v4(),
        level: level.id.clone(),
        timestamp: at,
        action,
        error: None,
        context: None,
        ring,
    };

    let mut rejected = None;
    let event = match &verdict {
        Verdict::Push { ring, .. } => Some(stamp(ActionKind::Push, Some(*ring))),
        Verdict::Pop { ring, .. } => Some(stamp(ActionKind::Pop, Some(*ring))),
        Verdict::Move { ring, from, to } => Some(LogEvent {
            context: Some(format!("{from} -> {to}")),
            ..stamp(ActionKind::Move, Some(*ring))
        }),
        Verdict::Select(_) | Verdict::Deselect => None,
        Verdict::Reject { error, ring, context } => {
            rejected = *ring;
            Some(LogEvent {
                error: Some(*error),
                context: context.clone(),
                ..stamp(ActionKind::Error, *ring)
            })
        }
    };

    level.behavior.tally(&verdict, &mut next);

    if let Err(e) = next.verify() {
        log::error!("{} left the puzzle inconsistent after {:?}: {}", level.id, verdict, e);
        return None;
    }

    let completed = event.is_some() && level.is_satisfied(&next, event.as_ref());

    Some(Transition {
        next,
        event,
        completed,
        rejected,
    })
}

/// Carry out the stack mutation a verdict asks for. `Err` describes a
/// verdict the puzzle could not honour; rejections mutate nothing.
fn apply(next: &mut PuzzleState, verdict: &Verdict) -> Result<(), String> {
    match verdict {
        Verdict::Push { ring, pole } => next
            .push(*ring, *pole)
            .map(|_| ())
            .ok_or_else(|| format!("cannot push {ring} onto {pole}")),
        Verdict::Pop { ring, pole } => match next.pop(*pole) {
            Some(popped) if popped == *ring => Ok(()),
            Some(popped) => Err(format!("popped {popped} from {pole}, expected {ring}")),
            None => Err(format!("{pole} is empty or missing")),
        },
        Verdict::Move { ring, from, to } => match next.move_top(*from, *to) {
            Some((moved, _)) if moved == *ring => {
                next.set_selected(None);
                Ok(())
            }
            Some((moved, _)) => Err(format!("moved {moved} from {from}, expected {ring}")),
            None => Err(format!("cannot move {from} -> {to}")),
        },
        Verdict::Select(ring) => {
            next.set_selected(Some(*ring));
            Ok(())
        }
        Verdict::Deselect => {
            next.set_selected(None);
            Ok(())
        }
        Verdict::Reject { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::journal::ErrorKind;
    use crate::core::level::{LevelCatalog, Rules};
    use crate::core::pole::PoleId;

    fn level(index: usize) -> LevelDef {
        LevelCatalog::standard(&Rules::default()).get(index).unwrap().clone()
    }

    #[test]
    fn test_push_records_depth_and_event() {
        let level = level(0);
        let state = level.initial_state();
        let t = process(&state, &level, Gesture::ClickRing(RingId(0)), 42).unwrap();
        assert_eq!(t.next.size(PoleId::Center), 1);
        assert_eq!(t.next.ring(RingId(0)).unwrap().depth(), Some(0));
        let event = t.event.unwrap();
        assert_eq!(event.action, ActionKind::Push);
        assert_eq!(event.timestamp, 42);
        assert_eq!(event.level.as_str(), "LEVEL_1");
        assert!(!t.completed);
        assert_eq!(t.rejected, None);
    }

    #[test]
    fn test_rejection_leaves_stacks_untouched() {
        let level = level(1);
        let state = level.initial_state();
        let t = process(&state, &level, Gesture::ClickRing(RingId(0)), 0).unwrap();
        assert_eq!(t.next.poles(), state.poles());
        assert_eq!(t.next.rings(), state.rings());
        assert_eq!(t.rejected, Some(RingId(0)));
        assert_eq!(t.event.unwrap().error, Some(ErrorKind::LifoViolation));
    }

    #[test]
    fn test_ignored_gesture_yields_nothing() {
        let level = level(0);
        let state = level.initial_state();
        assert!(process(&state, &level, Gesture::ClickPole(PoleId::Center), 0).is_none());
        assert!(process(&state, &level, Gesture::ClickRing(RingId(99)), 0).is_none());
    }

    #[test]
    fn test_completion_uses_post_action_size() {
        let level = level(0);
        let mut state = level.initial_state();
        for i in 0..2 {
            let t = process(&state, &level, Gesture::ClickRing(RingId(i)), 0).unwrap();
            assert!(!t.completed);
            state = t.next;
        }
        let t = process(&state, &level, Gesture::ClickRing(RingId(2)), 0).unwrap();
        assert!(t.completed);
    }

    #[test]
    fn test_selection_toggle_has_no_event() {
        let level = level(5);
        let state = level.initial_state();
        let top = state.pole(PoleId::Left).unwrap().top().unwrap();
        let t = process(&state, &level, Gesture::ClickRing(top), 0).unwrap();
        assert!(t.event.is_none());
        assert!(!t.completed);
        assert_eq!(t.next.selected(), Some(top));
        let t = process(&t.next, &level, Gesture::ClickRing(top), 0).unwrap();
        assert_eq!(t.next.selected(), None);
    }

    #[test]
    fn test_mismatched_pop_is_refused() {
        let level = level(1);
        let mut state = level.initial_state();
        // Ring 0 is at the bottom; the pole would hand back ring 3
        let verdict = Verdict::Pop { ring: RingId(0), pole: PoleId::Center };
        assert!(apply(&mut state, &verdict).unwrap_err().contains("expected a"));
    }

    #[test]
    fn test_push_onto_missing_pole_is_refused() {
        let level = level(0);
        let mut state = level.initial_state();
        let verdict = Verdict::Push { ring: RingId(0), pole: PoleId::Right };
        assert!(apply(&mut state, &verdict).is_err());
        assert!(state.ring(RingId(0)).unwrap().is_on_floor());
    }
}
