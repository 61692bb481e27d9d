//! # Level Director
//!
//! Walks the subject through the catalog, one level at a time.
//!
//! ```text
//! Active(i, Open) ──goal met──▶ Active(i, Pending) ──alarm──▶ Active(i, Celebrating)
//!        ▲                                                           │
//!        └──────────── acknowledge (i+1 < N) ────────────────────────┤
//!                                                                    ▼
//!                                                   acknowledge (i+1 == N) ──▶ Complete
//! ```
//!
//! With `auto_advance` the alarm skips the celebration and advances directly.
//! Input is only accepted while the gate is `Open`; the index never goes
//! back.

use log::{debug, info};
use std::time::Duration;

use crate::core::alarm::Alarm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    /// Goal met, waiting for the alarm.
    Pending,
    /// Success banner is up, waiting for the subject to continue.
    Celebrating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active { index: usize, gate: Gate },
    Complete,
}

/// Result of a director step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Stay,
    Next(usize),
    Finished,
}

#[derive(Debug, Clone)]
pub struct LevelDirector {
    phase: Phase,
    total: usize,
    delay: Duration,
    auto_advance: bool,
}

impl LevelDirector {
    pub fn new(total: usize, delay: Duration, auto_advance: bool) -> Self {
        let phase = if total == 0 {
            Phase::Complete
        } else {
            Phase::Active { index: 0, gate: Gate::Open }
        };
        Self {
            phase,
            total,
            delay,
            auto_advance,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> Option<usize> {
        match self.phase {
            Phase::Active { index, .. } => Some(index),
            Phase::Complete => None,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Active { gate: Gate::Open, .. })
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self.phase, Phase::Active { gate: Gate::Celebrating, .. })
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Close the gate and schedule the completion signal. Returns `false`
    /// if a completion is already in flight.
    pub fn record_completion(&mut self, alarm: &dyn Alarm) -> bool {
        let Phase::Active { index, gate: Gate::Open } = self.phase else {
            return false;
        };
        self.phase = Phase::Active { index, gate: Gate::Pending };
        info!("Level {} complete, signalling in {:?}", index + 1, self.delay);
        alarm.schedule(self.delay);
        true
    }

    /// The alarm fired. Signals with nothing pending are dropped.
    pub fn on_signal(&mut self) -> Advance {
        let Phase::Active { index, gate: Gate::Pending } = self.phase else {
            debug!("Ignoring completion signal in {:?}", self.phase);
            return Advance::Stay;
        };
        if self.auto_advance {
            return self.advance_from(index);
        }
        self.phase = Phase::Active { index, gate: Gate::Celebrating };
        Advance::Stay
    }

    /// Subject dismissed the success banner.
    pub fn acknowledge(&mut self) -> Advance {
        match self.phase {
            Phase::Active { index, gate: Gate::Celebrating } => self.advance_from(index),
            _ => Advance::Stay,
        }
    }

    fn advance_from(&mut self, index: usize) -> Advance {
        let next = index + 1;
        if next < self.total {
            self.phase = Phase::Active { index: next, gate: Gate::Open };
            info!("Advancing to level {}/{}", next + 1, self.total);
            Advance::Next(next)
        } else {
            self.phase = Phase::Complete;
            info!("Study complete after {} levels", self.total);
            Advance::Finished
        }
    }
}
