//! # Rings
//!
//! The pieces a subject moves around. A ring is either lying on the floor at
//! its fixed placement or sitting on a pole at some depth (0 = bottom).
//!
//! ```text
//! Ring
//! ├── id: RingId          // unique within a level, also the key label
//! ├── color: RingColor    // semantic tag (GOLD is the usual target)
//! ├── floor: FloorSpot    // where it rests when not stacked
//! └── location: Location  // Floor | OnPole { pole, depth }
//! ```
//!
//! Depth only exists inside `Location::OnPole`, so a floor ring can never
//! carry a stale depth.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::pole::PoleId;

/// Identity of a ring within the active level.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RingId(pub usize);

impl RingId {
    /// Keyboard label for this ring: `a`, `b`, `c`, ...
    pub fn label(self) -> char {
        (b'a' + (self.0 % 26) as u8) as char
    }

    /// Inverse of [`RingId::label`].
    pub fn from_label(c: char) -> Option<Self> {
        c.is_ascii_lowercase().then(|| RingId((c as u8 - b'a') as usize))
    }
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RingColor {
    Red,
    Blue,
    Green,
    Gold,
    Purple,
}

impl RingColor {
    /// Palette order used when handing out colors to floor rings.
    pub const PALETTE: [RingColor; 5] = [
        RingColor::Red,
        RingColor::Blue,
        RingColor::Green,
        RingColor::Gold,
        RingColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RingColor::Red => "RED",
            RingColor::Blue => "BLUE",
            RingColor::Green => "GREEN",
            RingColor::Gold => "GOLD",
            RingColor::Purple => "PURPLE",
        }
    }

    /// Display color for front ends that can show RGB.
    pub fn hex(self) -> &'static str {
        match self {
            RingColor::Red => "#ef4444",
            RingColor::Blue => "#3b82f6",
            RingColor::Green => "#22c55e",
            RingColor::Gold => "#eab308",
            RingColor::Purple => "#a855f7",
        }
    }

    /// Context tag used in log events, e.g. `GOLD_RING`.
    pub fn ring_tag(self) -> String {
        format!("{}_RING", self.name())
    }
}

/// Fixed 2D resting place on the floor (x/z plane, pole at the origin).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FloorSpot {
    pub x: f32,
    pub z: f32,
}

impl FloorSpot {
    pub const MIN_RADIUS: f32 = 4.0;
    pub const MAX_RADIUS: f32 = 8.0;

    /// Spread `count` rings evenly around the poles, alternating between the
    /// inner and outer radius so neighbours don't overlap.
    pub fn ring_of(count: usize) -> Vec<FloorSpot> {
        (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count.max(1) as f32;
                let radius = if i % 2 == 0 {
                    Self::MIN_RADIUS + 1.0
                } else {
                    Self::MAX_RADIUS - 1.0
                };
                FloorSpot {
                    x: angle.cos() * radius,
                    z: angle.sin() * radius,
                }
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Location {
    Floor,
    OnPole { pole: PoleId, depth: usize },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ring {
    pub id: RingId,
    pub color: RingColor,
    pub floor: FloorSpot,
    pub location: Location,
}

impl Ring {
    pub fn on_floor(id: RingId, color: RingColor, floor: FloorSpot) -> Self {
        Self {
            id,
            color,
            floor,
            location: Location::Floor,
        }
    }

    pub fn is_on_floor(&self) -> bool {
        matches!(self.location, Location::Floor)
    }

    pub fn pole(&self) -> Option<PoleId> {
        match self.location {
            Location::OnPole { pole, .. } => Some(pole),
            Location::Floor => None,
        }
    }

    pub fn depth(&self) -> Option<usize> {
        match self.location {
            Location::OnPole { depth, .. } => Some(depth),
            Location::Floor => None,
        }
    }
}
