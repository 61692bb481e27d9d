//! # Level Catalog
//!
//! The ordered list of study tasks. Each level knows how to lay out its
//! starting position, which behavior interprets clicks, and when it is done.
//!
//! The catalog is built once from [`Rules`] and shared read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::journal::LogEvent;
use crate::core::pole::{Layout, PoleId};
use crate::core::puzzle::PuzzleState;
use crate::core::ring::RingColor;
use crate::core::rules::{
    CountedPop, CrossPole, Lifo, LifoGoal, LevelBehavior, ProcessAction, PushGoal, PushOnly,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tunable numbers shared by the standard levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub capacity: usize,
    pub push_target: usize,
    pub pop_target: u32,
    pub floor_rings: usize,
}

impl Rules {
    pub const DEFAULT_CAPACITY: usize = 5;
    pub const DEFAULT_PUSH_TARGET: usize = 3;
    pub const DEFAULT_POP_TARGET: u32 = 5;
    pub const DEFAULT_FLOOR_RINGS: usize = 8;
    /// Keyboard labels run out after this many rings per level.
    pub const MAX_FLOOR_RINGS: usize = 12;
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            push_target: Self::DEFAULT_PUSH_TARGET,
            pop_target: Self::DEFAULT_POP_TARGET,
            floor_rings: Self::DEFAULT_FLOOR_RINGS,
        }
    }
}

/// Starting position: stacks are listed bottom to top and laid out before
/// the floor rings, so stacked rings get the first labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Setup {
    pub stacks: Vec<(PoleId, Vec<RingColor>)>,
    pub floor: usize,
}

#[derive(Debug, Clone)]
pub struct LevelDef {
    pub id: LevelId,
    pub title: String,
    pub instruction: String,
    pub layout: Layout,
    /// Stacked rings are hidden from the subject.
    pub blindfold: bool,
    /// Short tag shown next to the task counter, e.g. "STRESS TEST".
    pub badge: Option<String>,
    pub setup: Setup,
    pub behavior: LevelBehavior,
}

impl LevelDef {
    /// Fresh puzzle for this level.
    pub fn initial_state(&self) -> PuzzleState {
        let mut builder = PuzzleState::builder(self.layout);
        for (pole, colors) in &self.setup.stacks {
            builder = builder.stacked(*pole, colors);
        }
        builder.floor_palette(self.setup.floor).build()
    }

    /// Whether the level's goal holds for `puzzle` right after `last`.
    pub fn is_satisfied(&self, puzzle: &PuzzleState, last: Option<&LogEvent>) -> bool {
        self.behavior.is_satisfied(puzzle, last)
    }
}

#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDef>) -> Self {
        Self { levels }
    }

    /// The six-task study sequence.
    pub fn standard(rules: &Rules) -> Self {
        use RingColor::*;

        // The stress test needs one ring more than fits, so capacity stays
        // below the label limit.
        let capacity = rules.capacity.clamp(1, Rules::MAX_FLOOR_RINGS - 1);
        let push_target = rules.push_target.clamp(1, capacity);
        let floor_rings = rules.floor_rings.clamp(push_target, Rules::MAX_FLOOR_RINGS);
        let stress_rings = floor_rings.max(capacity + 1);

        let levels = vec![
            LevelDef {
                id: LevelId::new("LEVEL_1"),
                title: "The Basics".into(),
                instruction: format!("Push {} rings onto the stack.", push_target),
                layout: Layout::Single,
                blindfold: false,
                badge: None,
                setup: Setup { stacks: vec![], floor: floor_rings },
                behavior: LevelBehavior::PushOnly(PushOnly {
                    pole: PoleId::Center,
                    capacity,
                    goal: PushGoal::Size(push_target),
                }),
            },
            LevelDef {
                id: LevelId::new("LEVEL_2"),
                title: "LIFO Logic".into(),
                instruction: "Empty the stack completely.".into(),
                layout: Layout::Single,
                blindfold: false,
                badge: None,
                setup: Setup {
                    stacks: vec![(PoleId::Center, vec![Red, Blue, Green, Purple])],
                    floor: 0,
                },
                behavior: LevelBehavior::Lifo(Lifo {
                    pole: PoleId::Center,
                    capacity,
                    goal: LifoGoal::Empty,
                }),
            },
            LevelDef {
                id: LevelId::new("LEVEL_3"),
                title: "Dig for Gold".into(),
                instruction: "Get the gold ring off the stack.".into(),
                layout: Layout::Single,
                blindfold: false,
                badge: None,
                setup: Setup {
                    stacks: vec![(PoleId::Center, vec![Red, Gold, Blue, Green])],
                    floor: 0,
                },
                behavior: LevelBehavior::Lifo(Lifo {
                    pole: PoleId::Center,
                    capacity,
                    goal: LifoGoal::Retrieve(Gold),
                }),
            },
            LevelDef {
                id: LevelId::new("LEVEL_4"),
                title: "Capacity Stress Test".into(),
                instruction: format!("Try to push {} rings onto the stack.", capacity + 1),
                layout: Layout::Single,
                blindfold: false,
                badge: Some("STRESS TEST".into()),
                setup: Setup { stacks: vec![], floor: stress_rings },
                behavior: LevelBehavior::PushOnly(PushOnly {
                    pole: PoleId::Center,
                    capacity,
                    goal: PushGoal::Overflow,
                }),
            },
            LevelDef {
                id: LevelId::new("LEVEL_5"),
                title: "Blind Pops".into(),
                instruction: format!(
                    "The stack is hidden. Click the pole to pop {} times.",
                    rules.pop_target
                ),
                layout: Layout::Single,
                blindfold: true,
                badge: Some("BLINDFOLD".into()),
                setup: Setup {
                    stacks: vec![(PoleId::Center, vec![Blue, Green, Red])],
                    floor: 0,
                },
                behavior: LevelBehavior::CountedPop(CountedPop {
                    pole: PoleId::Center,
                    capacity,
                    target: rules.pop_target,
                }),
            },
            LevelDef {
                id: LevelId::new("LEVEL_6"),
                title: "Two Towers".into(),
                instruction: "Put the gold ring on top of the RIGHT pole.".into(),
                layout: Layout::Dual,
                blindfold: false,
                badge: None,
                setup: Setup {
                    stacks: vec![(PoleId::Left, vec![Gold, Red, Blue])],
                    floor: 0,
                },
                behavior: LevelBehavior::CrossPole(CrossPole {
                    goal_color: Gold,
                    goal_pole: PoleId::Right,
                }),
            },
        ];

        Self { levels }
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDef> {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_order() {
        let catalog = LevelCatalog::standard(&Rules::default());
        let ids: Vec<_> = catalog.iter().map(|l| l.id.to_string()).collect();
        assert_eq!(
            ids,
            vec!["LEVEL_1", "LEVEL_2", "LEVEL_3", "LEVEL_4", "LEVEL_5", "LEVEL_6"]
        );
    }

    #[test]
    fn test_every_initial_state_is_consistent_and_unfinished() {
        let catalog = LevelCatalog::standard(&Rules::default());
        for level in catalog.iter() {
            let state = level.initial_state();
            assert_eq!(state.verify(), Ok(()), "{}", level.id);
            assert!(!level.is_satisfied(&state, None), "{} starts solved", level.id);
            assert_eq!(state.layout(), level.layout);
        }
    }

    #[test]
    fn test_stress_level_has_more_rings_than_capacity() {
        let rules = Rules { floor_rings: 2, ..Rules::default() };
        let catalog = LevelCatalog::standard(&rules);
        let stress = catalog.get(3).unwrap();
        assert!(stress.initial_state().floor_rings().count() > rules.capacity);
    }

    #[test]
    fn test_oversized_capacity_still_leaves_a_ring_to_overflow() {
        let rules = Rules { capacity: 12, push_target: 20, ..Rules::default() };
        let catalog = LevelCatalog::standard(&rules);
        let stress = catalog.get(3).unwrap();
        let LevelBehavior::PushOnly(push) = &stress.behavior else {
            panic!("stress level is not a push level");
        };
        assert_eq!(push.capacity, Rules::MAX_FLOOR_RINGS - 1);
        assert!(stress.initial_state().floor_rings().count() > push.capacity);

        let basics = catalog.get(0).unwrap();
        let LevelBehavior::PushOnly(push) = &basics.behavior else {
            panic!("first level is not a push level");
        };
        assert_eq!(push.goal, PushGoal::Size(push.capacity));
        assert!(basics.initial_state().floor_rings().count() >= push.capacity);
    }

    #[test]
    fn test_floor_rings_are_clamped_to_labels() {
        let rules = Rules { floor_rings: 40, ..Rules::default() };
        let catalog = LevelCatalog::standard(&rules);
        let first = catalog.get(0).unwrap().initial_state();
        assert_eq!(first.rings().len(), Rules::MAX_FLOOR_RINGS);
    }

    #[test]
    fn test_gold_is_buried_in_retrieve_level() {
        let catalog = LevelCatalog::standard(&Rules::default());
        let state = catalog.get(2).unwrap().initial_state();
        let top = state.pole(PoleId::Center).and_then(|p| p.top()).unwrap();
        assert_ne!(state.ring(top).unwrap().color, RingColor::Gold);
    }
}
