//! # Level Behaviors
//!
//! On single-pole levels a ring click always means the same thing: a floor
//! ring tries to go onto the pole, a stacked ring tries to come off. Levels
//! differ in their goal and in what a pole click means; on the two-pole
//! level a ring click picks the ring up instead. Each family is a variant of
//! [`LevelBehavior`] and implements [`ProcessAction`].
//!
//! Behaviors only *judge*: they look at the puzzle and return a [`Verdict`].
//! Applying the verdict and writing the log entry is the processor's job,
//! so every family shares one mutation path.

use crate::core::journal::{ActionKind, ErrorKind, LogEvent};
use crate::core::pole::PoleId;
use crate::core::puzzle::PuzzleState;
use crate::core::ring::{RingColor, RingId};

/// Raw input from the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    ClickRing(RingId),
    ClickPole(PoleId),
}

/// What a behavior decided a gesture means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Push { ring: RingId, pole: PoleId },
    Pop { ring: RingId, pole: PoleId },
    Move { ring: RingId, from: PoleId, to: PoleId },
    Select(RingId),
    Deselect,
    Reject {
        error: ErrorKind,
        ring: Option<RingId>,
        context: Option<String>,
    },
}

pub const EMPTY_POP: &str = "EMPTY_POP";
pub const BURIED_RING: &str = "BURIED_RING";

pub trait ProcessAction {
    /// Decide what `gesture` means against `puzzle`. `None` when the gesture
    /// has no meaning on this level or names something that doesn't exist.
    fn judge(&self, puzzle: &PuzzleState, gesture: Gesture) -> Option<Verdict>;

    /// Update level-local counters after `verdict` was applied.
    fn tally(&self, _verdict: &Verdict, _puzzle: &mut PuzzleState) {}

    /// Completion predicate over the post-action puzzle and the event just
    /// emitted.
    fn is_satisfied(&self, puzzle: &PuzzleState, last: Option<&LogEvent>) -> bool;
}

// ============================================================================
// Push-only
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushGoal {
    /// Pole holds exactly this many rings.
    Size(usize),
    /// Pole is full and the subject just tried to overfill it.
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOnly {
    pub pole: PoleId,
    pub capacity: usize,
    pub goal: PushGoal,
}

impl ProcessAction for PushOnly {
    fn judge(&self, puzzle: &PuzzleState, gesture: Gesture) -> Option<Verdict> {
        match gesture {
            Gesture::ClickRing(id) => ring_click(puzzle, id, self.pole, self.capacity, None),
            Gesture::ClickPole(_) => None,
        }
    }

    fn is_satisfied(&self, puzzle: &PuzzleState, last: Option<&LogEvent>) -> bool {
        let size = puzzle.size(self.pole);
        match self.goal {
            PushGoal::Size(n) => size == n,
            PushGoal::Overflow => {
                size == self.capacity
                    && last.is_some_and(|e| e.is_error_kind(ErrorKind::CapacityFull))
            }
        }
    }
}

// ============================================================================
// LIFO (pop-only)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifoGoal {
    /// Every pole is empty.
    Empty,
    /// A ring of this color was just popped.
    Retrieve(RingColor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifo {
    pub pole: PoleId,
    pub capacity: usize,
    pub goal: LifoGoal,
}

impl Lifo {
    fn target(&self) -> Option<RingColor> {
        match self.goal {
            LifoGoal::Retrieve(color) => Some(color),
            LifoGoal::Empty => None,
        }
    }
}

/// Shared single-pole ring click: floor rings are pushed onto `pole` while
/// it has room, stacked rings are popped if they are on top.
fn ring_click(
    puzzle: &PuzzleState,
    id: RingId,
    pole: PoleId,
    capacity: usize,
    target: Option<RingColor>,
) -> Option<Verdict> {
    if !puzzle.ring(id)?.is_on_floor() {
        return pop_if_top(puzzle, id, target);
    }
    puzzle.pole(pole)?;
    if puzzle.size(pole) >= capacity {
        return Some(Verdict::Reject {
            error: ErrorKind::CapacityFull,
            ring: Some(id),
            context: None,
        });
    }
    Some(Verdict::Push { ring: id, pole })
}

/// Pop `id` if it is the top of its pole, otherwise a LIFO violation tagged
/// with the target color when the buried ring is the one being hunted.
fn pop_if_top(puzzle: &PuzzleState, id: RingId, target: Option<RingColor>) -> Option<Verdict> {
    let ring = puzzle.ring(id)?;
    let pole = ring.pole()?;
    if puzzle.pole(pole)?.is_top(id) {
        return Some(Verdict::Pop { ring: id, pole });
    }
    let context = match target {
        Some(color) if ring.color == color => color.ring_tag(),
        _ => BURIED_RING.to_string(),
    };
    Some(Verdict::Reject {
        error: ErrorKind::LifoViolation,
        ring: Some(id),
        context: Some(context),
    })
}

impl ProcessAction for Lifo {
    fn judge(&self, puzzle: &PuzzleState, gesture: Gesture) -> Option<Verdict> {
        match gesture {
            Gesture::ClickRing(id) => {
                ring_click(puzzle, id, self.pole, self.capacity, self.target())
            }
            Gesture::ClickPole(_) => None,
        }
    }

    fn is_satisfied(&self, puzzle: &PuzzleState, last: Option<&LogEvent>) -> bool {
        match self.goal {
            LifoGoal::Empty => puzzle.stacked() == 0,
            LifoGoal::Retrieve(color) => last.is_some_and(|e| {
                e.action == ActionKind::Pop
                    && e.ring
                        .and_then(|id| puzzle.ring(id))
                        .is_some_and(|r| r.color == color)
            }),
        }
    }
}

// ============================================================================
// Counted pops
// ============================================================================

/// Success is a number of pop attempts, legal or phantom, not a stack shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedPop {
    pub pole: PoleId,
    pub capacity: usize,
    pub target: u32,
}

impl ProcessAction for CountedPop {
    fn judge(&self, puzzle: &PuzzleState, gesture: Gesture) -> Option<Verdict> {
        match gesture {
            Gesture::ClickRing(id) => ring_click(puzzle, id, self.pole, self.capacity, None),
            Gesture::ClickPole(pole) => match puzzle.pole(pole)?.top() {
                Some(ring) => Some(Verdict::Pop { ring, pole }),
                None => Some(Verdict::Reject {
                    error: ErrorKind::StackUnderflow,
                    ring: None,
                    context: Some(EMPTY_POP.to_string()),
                }),
            },
        }
    }

    fn tally(&self, verdict: &Verdict, puzzle: &mut PuzzleState) {
        let counts = matches!(
            verdict,
            Verdict::Pop { .. }
                | Verdict::Reject {
                    error: ErrorKind::StackUnderflow,
                    ..
                }
        );
        if counts {
            puzzle.bump_attempts();
        }
    }

    fn is_satisfied(&self, puzzle: &PuzzleState, _last: Option<&LogEvent>) -> bool {
        puzzle.attempts() >= self.target
    }
}

// ============================================================================
// Cross-pole moves
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossPole {
    pub goal_color: RingColor,
    pub goal_pole: PoleId,
}

impl ProcessAction for CrossPole {
    fn judge(&self, puzzle: &PuzzleState, gesture: Gesture) -> Option<Verdict> {
        match gesture {
            Gesture::ClickRing(id) => {
                let pole = puzzle.ring(id)?.pole()?;
                if !puzzle.pole(pole)?.is_top(id) {
                    return Some(Verdict::Reject {
                        error: ErrorKind::BlockedByTop,
                        ring: Some(id),
                        context: None,
                    });
                }
                if puzzle.selected() == Some(id) {
                    Some(Verdict::Deselect)
                } else {
                    Some(Verdict::Select(id))
                }
            }
            Gesture::ClickPole(to) => {
                puzzle.pole(to)?;
                let ring = puzzle.selected()?;
                let from = puzzle.ring(ring)?.pole()?;
                if from == to {
                    Some(Verdict::Deselect)
                } else {
                    Some(Verdict::Move { ring, from, to })
                }
            }
        }
    }

    fn is_satisfied(&self, puzzle: &PuzzleState, _last: Option<&LogEvent>) -> bool {
        puzzle
            .pole(self.goal_pole)
            .and_then(|p| p.top())
            .and_then(|id| puzzle.ring(id))
            .is_some_and(|r| r.color == self.goal_color)
    }
}

// ============================================================================
// Closed set
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelBehavior {
    PushOnly(PushOnly),
    Lifo(Lifo),
    CountedPop(CountedPop),
    CrossPole(CrossPole),
}

impl LevelBehavior {
    fn inner(&self) -> &dyn ProcessAction {
        match self {
            LevelBehavior::PushOnly(b) => b,
            LevelBehavior::Lifo(b) => b,
            LevelBehavior::CountedPop(b) => b,
            LevelBehavior::CrossPole(b) => b,
        }
    }
}

impl ProcessAction for LevelBehavior {
    fn judge(&self, puzzle: &PuzzleState, gesture: Gesture) -> Option<Verdict> {
        self.inner().judge(puzzle, gesture)
    }

    fn tally(&self, verdict: &Verdict, puzzle: &mut PuzzleState) {
        self.inner().tally(verdict, puzzle)
    }

    fn is_satisfied(&self, puzzle: &PuzzleState, last: Option<&LogEvent>) -> bool {
        self.inner().is_satisfied(puzzle, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pole::Layout;
    use crate::core::ring::RingColor::*;

    fn lifo_abc() -> PuzzleState {
        PuzzleState::builder(Layout::Single)
            .stacked(PoleId::Center, &[Red, Gold, Blue])
            .build()
    }

    fn lifo(goal: LifoGoal) -> Lifo {
        Lifo { pole: PoleId::Center, capacity: 5, goal }
    }

    fn counted(target: u32) -> CountedPop {
        CountedPop { pole: PoleId::Center, capacity: 5, target }
    }

    #[test]
    fn test_push_only_pops_stacked_top_and_ignores_poles() {
        let rules = PushOnly { pole: PoleId::Center, capacity: 5, goal: PushGoal::Size(3) };
        let state = lifo_abc();
        assert_eq!(
            rules.judge(&state, Gesture::ClickRing(RingId(2))),
            Some(Verdict::Pop { ring: RingId(2), pole: PoleId::Center })
        );
        assert!(matches!(
            rules.judge(&state, Gesture::ClickRing(RingId(0))),
            Some(Verdict::Reject { error: ErrorKind::LifoViolation, .. })
        ));
        assert_eq!(rules.judge(&state, Gesture::ClickPole(PoleId::Center)), None);
    }

    #[test]
    fn test_push_only_rejects_at_capacity() {
        let rules = PushOnly { pole: PoleId::Center, capacity: 3, goal: PushGoal::Overflow };
        let state = PuzzleState::builder(Layout::Single)
            .stacked(PoleId::Center, &[Red, Gold, Blue])
            .floor(Green)
            .build();
        assert_eq!(
            rules.judge(&state, Gesture::ClickRing(RingId(3))),
            Some(Verdict::Reject {
                error: ErrorKind::CapacityFull,
                ring: Some(RingId(3)),
                context: None
            })
        );
    }

    #[test]
    fn test_lifo_tags_buried_target() {
        let rules = lifo(LifoGoal::Retrieve(Gold));
        let state = lifo_abc();
        let verdict = rules.judge(&state, Gesture::ClickRing(RingId(1))).unwrap();
        assert_eq!(
            verdict,
            Verdict::Reject {
                error: ErrorKind::LifoViolation,
                ring: Some(RingId(1)),
                context: Some("GOLD_RING".into())
            }
        );
        let verdict = rules.judge(&state, Gesture::ClickRing(RingId(0))).unwrap();
        assert!(matches!(verdict, Verdict::Reject { context: Some(c), .. } if c == BURIED_RING));
    }

    #[test]
    fn test_lifo_pushes_floor_rings_back_and_ignores_unknown_ids() {
        let rules = lifo(LifoGoal::Empty);
        let state = PuzzleState::builder(Layout::Single).floor(Red).build();
        assert_eq!(
            rules.judge(&state, Gesture::ClickRing(RingId(0))),
            Some(Verdict::Push { ring: RingId(0), pole: PoleId::Center })
        );
        assert_eq!(rules.judge(&state, Gesture::ClickRing(RingId(9))), None);
        assert_eq!(rules.judge(&state, Gesture::ClickPole(PoleId::Center)), None);
    }

    #[test]
    fn test_counted_pop_floor_ring_respects_capacity() {
        let rules = CountedPop { pole: PoleId::Center, capacity: 3, target: 5 };
        let full = PuzzleState::builder(Layout::Single)
            .stacked(PoleId::Center, &[Red, Gold, Blue])
            .floor(Green)
            .build();
        assert_eq!(
            rules.judge(&full, Gesture::ClickRing(RingId(3))),
            Some(Verdict::Reject {
                error: ErrorKind::CapacityFull,
                ring: Some(RingId(3)),
                context: None
            })
        );
    }

    #[test]
    fn test_counted_pop_pole_click_pops_top_or_underflows() {
        let rules = counted(5);
        let state = lifo_abc();
        assert_eq!(
            rules.judge(&state, Gesture::ClickPole(PoleId::Center)),
            Some(Verdict::Pop { ring: RingId(2), pole: PoleId::Center })
        );
        let empty = PuzzleState::builder(Layout::Single).build();
        assert!(matches!(
            rules.judge(&empty, Gesture::ClickPole(PoleId::Center)),
            Some(Verdict::Reject { error: ErrorKind::StackUnderflow, ring: None, .. })
        ));
    }

    #[test]
    fn test_counted_pop_tally_skips_lifo_violations() {
        let rules = counted(5);
        let mut state = lifo_abc();
        rules.tally(
            &Verdict::Reject { error: ErrorKind::LifoViolation, ring: Some(RingId(0)), context: None },
            &mut state,
        );
        assert_eq!(state.attempts(), 0);
        rules.tally(&Verdict::Pop { ring: RingId(2), pole: PoleId::Center }, &mut state);
        assert_eq!(state.attempts(), 1);
    }

    #[test]
    fn test_cross_pole_pole_click_without_selection_is_ignored() {
        let rules = CrossPole { goal_color: Gold, goal_pole: PoleId::Right };
        let state = PuzzleState::builder(Layout::Dual)
            .stacked(PoleId::Left, &[Gold])
            .build();
        assert_eq!(rules.judge(&state, Gesture::ClickPole(PoleId::Right)), None);
        assert_eq!(rules.judge(&state, Gesture::ClickPole(PoleId::Center)), None);
    }

    #[test]
    fn test_cross_pole_goal_checks_top_of_goal_pole() {
        let rules = CrossPole { goal_color: Gold, goal_pole: PoleId::Right };
        let done = PuzzleState::builder(Layout::Dual)
            .stacked(PoleId::Right, &[Red, Gold])
            .build();
        assert!(rules.is_satisfied(&done, None));
        let buried = PuzzleState::builder(Layout::Dual)
            .stacked(PoleId::Right, &[Gold, Red])
            .build();
        assert!(!rules.is_satisfied(&buried, None));
    }
}
