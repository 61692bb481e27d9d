//! # Poles
//!
//! A pole is a named stack of ring ids, bottom to top. Only the last id is
//! reachable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::ring::RingId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoleId {
    Center,
    Left,
    Right,
}

impl PoleId {
    pub fn name(self) -> &'static str {
        match self {
            PoleId::Center => "CENTER",
            PoleId::Left => "LEFT",
            PoleId::Right => "RIGHT",
        }
    }
}

impl fmt::Display for PoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many poles a level shows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
    Single,
    Dual,
}

impl Layout {
    /// Poles in on-screen order (left to right).
    pub fn poles(self) -> &'static [PoleId] {
        match self {
            Layout::Single => &[PoleId::Center],
            Layout::Dual => &[PoleId::Left, PoleId::Right],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Pole {
    pub id: PoleId,
    pub stack: Vec<RingId>,
}

impl Pole {
    pub fn empty(id: PoleId) -> Self {
        Self { id, stack: Vec::new() }
    }

    pub fn size(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn top(&self) -> Option<RingId> {
        self.stack.last().copied()
    }

    pub fn is_top(&self, ring: RingId) -> bool {
        self.top() == Some(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_is_last_pushed() {
        let pole = Pole {
            id: PoleId::Center,
            stack: vec![RingId(0), RingId(1), RingId(2)],
        };
        assert_eq!(pole.top(), Some(RingId(2)));
        assert!(pole.is_top(RingId(2)));
        assert!(!pole.is_top(RingId(0)));
        assert_eq!(pole.size(), 3);
    }

    #[test]
    fn test_empty_pole_has_no_top() {
        let pole = Pole::empty(PoleId::Left);
        assert!(pole.is_empty());
        assert_eq!(pole.top(), None);
    }

    #[test]
    fn test_dual_layout_orders_left_then_right() {
        assert_eq!(Layout::Dual.poles(), &[PoleId::Left, PoleId::Right]);
        assert_eq!(Layout::Single.poles(), &[PoleId::Center]);
    }
}
