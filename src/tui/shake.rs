//! Rejection shake, owned entirely by the front end.
//!
//! The core only reports *which* ring was refused. Each report restarts that
//! ring's animation: four quick side-steps, then back to rest.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::core::ring::RingId;

const STEP: Duration = Duration::from_millis(40);
const OFFSETS: [i16; 5] = [-1, 1, -1, 1, 0];

#[derive(Debug, Default)]
pub struct Shakes {
    started: HashMap<RingId, Instant>,
}

impl Shakes {
    pub fn start(&mut self, ring: RingId, now: Instant) {
        self.started.insert(ring, now);
    }

    /// Horizontal offset in columns for `ring` at `now`.
    pub fn offset(&self, ring: RingId, now: Instant) -> i16 {
        let Some(start) = self.started.get(&ring) else {
            return 0;
        };
        let step = (now.saturating_duration_since(*start).as_millis() / STEP.as_millis()) as usize;
        OFFSETS.get(step).copied().unwrap_or(0)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        let total = STEP * OFFSETS.len() as u32;
        self.started
            .values()
            .any(|start| now.saturating_duration_since(*start) < total)
    }

    /// Forget finished animations and, on level change, everything.
    pub fn prune(&mut self, now: Instant) {
        let total = STEP * OFFSETS.len() as u32;
        self.started
            .retain(|_, start| now.saturating_duration_since(*start) < total);
    }

    pub fn clear(&mut self) {
        self.started.clear();
    }
}
