//! # Puzzle State
//!
//! Everything the subject can see and touch on the current level.
//!
//! ```text
//! PuzzleState
//! ├── layout: Layout            // Single (CENTER) or Dual (LEFT, RIGHT)
//! ├── rings: Vec<Ring>          // indexed by RingId
//! ├── poles: Vec<Pole>          // one per layout pole, bottom → top
//! ├── selected: Option<RingId>  // ring picked up for a cross-pole move
//! └── attempts: u32             // pop attempts, counted-pop levels only
//! ```
//!
//! Rings and poles describe the same fact twice (a ring's depth and its
//! position in the pole's stack). The mutators below are the only code that
//! touches both, and [`PuzzleState::verify`] checks they still agree.

use serde::Serialize;
use std::fmt;

use crate::core::pole::{Layout, Pole, PoleId};
use crate::core::ring::{FloorSpot, Location, Ring, RingColor, RingId};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PuzzleState {
    layout: Layout,
    rings: Vec<Ring>,
    poles: Vec<Pole>,
    selected: Option<RingId>,
    attempts: u32,
}

/// Broken ring/pole cross-consistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    UnknownRing { pole: PoleId, ring: RingId },
    DuplicateRing(RingId),
    DepthMismatch { ring: RingId, expected: Option<(PoleId, usize)>, found: Location },
    UnknownSelection(RingId),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UnknownRing { pole, ring } => {
                write!(f, "pole {pole} holds unknown ring {ring}")
            }
            StateError::DuplicateRing(ring) => write!(f, "ring {ring} is stacked twice"),
            StateError::DepthMismatch { ring, expected, found } => {
                write!(f, "ring {ring} should be at {expected:?} but says {found:?}")
            }
            StateError::UnknownSelection(ring) => write!(f, "selected ring {ring} does not exist"),
        }
    }
}

impl std::error::Error for StateError {}

impl PuzzleState {
    pub fn builder(layout: Layout) -> PuzzleBuilder {
        PuzzleBuilder { layout, rings: Vec::new() }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        self.rings.get(id.0)
    }

    pub fn poles(&self) -> &[Pole] {
        &self.poles
    }

    pub fn pole(&self, id: PoleId) -> Option<&Pole> {
        self.poles.iter().find(|p| p.id == id)
    }

    /// Stack size of `id`, or 0 for a pole this layout doesn't have.
    pub fn size(&self, id: PoleId) -> usize {
        self.pole(id).map_or(0, Pole::size)
    }

    /// Rings currently stacked across all poles.
    pub fn stacked(&self) -> usize {
        self.poles.iter().map(Pole::size).sum()
    }

    pub fn selected(&self) -> Option<RingId> {
        self.selected
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn floor_rings(&self) -> impl Iterator<Item = &Ring> {
        self.rings.iter().filter(|r| r.is_on_floor())
    }

    /// Ring ids on `pole`, bottom to top, resolved to rings.
    pub fn stack_of(&self, pole: PoleId) -> impl Iterator<Item = &Ring> {
        self.pole(pole)
            .into_iter()
            .flat_map(|p| p.stack.iter())
            .filter_map(|id| self.ring(*id))
    }

    // ------------------------------------------------------------------
    // Mutators (processor only)
    // ------------------------------------------------------------------

    /// Put a floor ring on top of `pole`. Returns the new depth.
    pub(crate) fn push(&mut self, ring: RingId, pole: PoleId) -> Option<usize> {
        let depth = self.pole(pole)?.size();
        let target = self.rings.get_mut(ring.0)?;
        if !target.is_on_floor() {
            return None;
        }
        target.location = Location::OnPole { pole, depth };
        self.pole_mut(pole)?.stack.push(ring);
        Some(depth)
    }

    /// Take the top ring off `pole` and drop it on the floor.
    pub(crate) fn pop(&mut self, pole: PoleId) -> Option<RingId> {
        let ring = self.pole_mut(pole)?.stack.pop()?;
        if let Some(r) = self.rings.get_mut(ring.0) {
            r.location = Location::Floor;
        }
        if self.selected == Some(ring) {
            self.selected = None;
        }
        Some(ring)
    }

    /// Move the top ring of `from` onto `to`. Returns the moved ring and its
    /// new depth.
    pub(crate) fn move_top(&mut self, from: PoleId, to: PoleId) -> Option<(RingId, usize)> {
        let depth = self.pole(to)?.size();
        let ring = self.pole_mut(from)?.stack.pop()?;
        self.pole_mut(to)?.stack.push(ring);
        if let Some(r) = self.rings.get_mut(ring.0) {
            r.location = Location::OnPole { pole: to, depth };
        }
        Some((ring, depth))
    }

    pub(crate) fn set_selected(&mut self, ring: Option<RingId>) {
        self.selected = ring;
    }

    pub(crate) fn bump_attempts(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    fn pole_mut(&mut self, id: PoleId) -> Option<&mut Pole> {
        self.poles.iter_mut().find(|p| p.id == id)
    }

    /// Check that every stacked id is a known ring, appears once, and that
    /// each ring's location matches its slot.
    pub fn verify(&self) -> Result<(), StateError> {
        let mut expected: Vec<Option<(PoleId, usize)>> = vec![None; self.rings.len()];
        for pole in &self.poles {
            for (depth, ring) in pole.stack.iter().enumerate() {
                let slot = expected
                    .get_mut(ring.0)
                    .ok_or(StateError::UnknownRing { pole: pole.id, ring: *ring })?;
                if slot.is_some() {
                    return Err(StateError::DuplicateRing(*ring));
                }
                *slot = Some((pole.id, depth));
            }
        }
        for (ring, expected) in self.rings.iter().zip(expected) {
            let agrees = match (ring.location, expected) {
                (Location::Floor, None) => true,
                (Location::OnPole { pole, depth }, Some(slot)) => (pole, depth) == slot,
                _ => false,
            };
            if !agrees {
                return Err(StateError::DepthMismatch {
                    ring: ring.id,
                    expected,
                    found: ring.location,
                });
            }
        }
        if let Some(sel) = self.selected
            && self.ring(sel).is_none()
        {
            return Err(StateError::UnknownSelection(sel));
        }
        Ok(())
    }
}

/// Assembles the starting position of a level. Ring ids are handed out in
/// the order rings are added; floor placements are assigned on `build`.
pub struct PuzzleBuilder {
    layout: Layout,
    rings: Vec<(RingColor, Option<PoleId>)>,
}

impl PuzzleBuilder {
    pub fn floor(mut self, color: RingColor) -> Self {
        self.rings.push((color, None));
        self
    }

    /// `count` floor rings cycling through the palette.
    pub fn floor_palette(mut self, count: usize) -> Self {
        for i in 0..count {
            self.rings.push((RingColor::PALETTE[i % RingColor::PALETTE.len()], None));
        }
        self
    }

    /// Stack rings onto `pole`, listed bottom to top. Poles outside the
    /// layout are ignored.
    pub fn stacked(mut self, pole: PoleId, colors: &[RingColor]) -> Self {
        if self.layout.poles().contains(&pole) {
            self.rings.extend(colors.iter().map(|c| (*c, Some(pole))));
        }
        self
    }

    pub fn build(self) -> PuzzleState {
        let spots = FloorSpot::ring_of(self.rings.len());
        let mut poles: Vec<Pole> = self.layout.poles().iter().map(|id| Pole::empty(*id)).collect();
        let mut rings = Vec::with_capacity(self.rings.len());

        for (i, ((color, pole), floor)) in self.rings.into_iter().zip(spots).enumerate() {
            let id = RingId(i);
            let mut ring = Ring::on_floor(id, color, floor);
            if let Some(pole) = pole
                && let Some(p) = poles.iter_mut().find(|p| p.id == pole)
            {
                ring.location = Location::OnPole { pole, depth: p.size() };
                p.stack.push(id);
            }
            rings.push(ring);
        }

        PuzzleState {
            layout: self.layout,
            rings,
            poles,
            selected: None,
            attempts: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ring::RingColor::*;

    fn single_with_stack() -> PuzzleState {
        PuzzleState::builder(Layout::Single)
            .stacked(PoleId::Center, &[Red, Gold, Blue])
            .floor(Green)
            .build()
    }

    #[test]
    fn test_builder_assigns_depths_bottom_up() {
        let state = single_with_stack();
        assert_eq!(state.size(PoleId::Center), 3);
        assert_eq!(state.ring(RingId(0)).unwrap().depth(), Some(0));
        assert_eq!(state.ring(RingId(2)).unwrap().depth(), Some(2));
        assert!(state.ring(RingId(3)).unwrap().is_on_floor());
        assert_eq!(state.verify(), Ok(()));
    }

    #[test]
    fn test_builder_ignores_poles_outside_layout() {
        let state = PuzzleState::builder(Layout::Single)
            .stacked(PoleId::Left, &[Red])
            .build();
        assert!(state.rings().is_empty());
        assert_eq!(state.size(PoleId::Left), 0);
    }

    #[test]
    fn test_push_sets_depth_to_previous_size() {
        let mut state = single_with_stack();
        assert_eq!(state.push(RingId(3), PoleId::Center), Some(3));
        assert_eq!(state.size(PoleId::Center), 4);
        assert_eq!(state.ring(RingId(3)).unwrap().depth(), Some(3));
        assert_eq!(state.verify(), Ok(()));
    }

    #[test]
    fn test_push_refuses_stacked_ring() {
        let mut state = single_with_stack();
        assert_eq!(state.push(RingId(0), PoleId::Center), None);
        assert_eq!(state.size(PoleId::Center), 3);
    }

    #[test]
    fn test_pop_returns_ring_to_floor() {
        let mut state = single_with_stack();
        assert_eq!(state.pop(PoleId::Center), Some(RingId(2)));
        let ring = state.ring(RingId(2)).unwrap();
        assert!(ring.is_on_floor());
        assert_eq!(ring.depth(), None);
        assert_eq!(state.verify(), Ok(()));
    }

    #[test]
    fn test_move_top_recomputes_depth() {
        let mut state = PuzzleState::builder(Layout::Dual)
            .stacked(PoleId::Left, &[Red, Gold])
            .stacked(PoleId::Right, &[Blue])
            .build();
        assert_eq!(state.move_top(PoleId::Left, PoleId::Right), Some((RingId(1), 1)));
        assert_eq!(state.size(PoleId::Left), 1);
        assert_eq!(state.size(PoleId::Right), 2);
        assert_eq!(state.verify(), Ok(()));
    }

    #[test]
    fn test_verify_catches_depth_drift() {
        let mut state = single_with_stack();
        state.rings[0].location = Location::Floor;
        assert!(matches!(
            state.verify(),
            Err(StateError::DepthMismatch { ring: RingId(0), .. })
        ));
    }

    #[test]
    fn test_verify_catches_duplicate_ids() {
        let mut state = single_with_stack();
        state.poles[0].stack.push(RingId(0));
        assert_eq!(state.verify(), Err(StateError::DuplicateRing(RingId(0))));
    }
}
