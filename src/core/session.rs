//! # Study Session
//!
//! One subject, one run through the catalog.
//!
//! ```text
//! Session
//! ├── catalog: Arc<LevelCatalog>  // read-only, shared
//! ├── director: LevelDirector     // which level, is input open
//! ├── puzzle: PuzzleState         // replaced on every level change
//! ├── log: SessionLog             // survives level changes
//! ├── participant: Option<String>
//! └── started_at: DateTime<Utc>
//! ```
//!
//! The session is the only place puzzle, log and director meet. Front ends
//! read it and drive it through `core::action::update`.

use chrono::{DateTime, Utc};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::core::alarm::Alarm;
use crate::core::director::{Advance, LevelDirector};
use crate::core::journal::SessionLog;
use crate::core::level::{LevelCatalog, LevelDef};
use crate::core::processor::process;
use crate::core::puzzle::PuzzleState;
use crate::core::ring::RingId;
use crate::core::rules::Gesture;

/// What a processed gesture did, for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub logged: bool,
    pub completed: bool,
    pub rejected: Option<RingId>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub completion_delay: Duration,
    pub auto_advance: bool,
    pub participant: Option<String>,
}

pub struct Session {
    catalog: Arc<LevelCatalog>,
    director: LevelDirector,
    puzzle: PuzzleState,
    log: SessionLog,
    participant: Option<String>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(catalog: Arc<LevelCatalog>, options: SessionOptions) -> Self {
        let director =
            LevelDirector::new(catalog.len(), options.completion_delay, options.auto_advance);
        let puzzle = catalog
            .get(0)
            .map(LevelDef::initial_state)
            .unwrap_or_else(|| PuzzleState::builder(crate::core::pole::Layout::Single).build());
        info!(
            "Session started: {} levels, participant {:?}",
            catalog.len(),
            options.participant
        );
        Self {
            catalog,
            director,
            puzzle,
            log: SessionLog::new(),
            participant: options.participant,
            started_at: Utc::now(),
        }
    }

    /// Active level, `None` once the study is complete.
    pub fn level(&self) -> Option<&LevelDef> {
        self.director.index().and_then(|i| self.catalog.get(i))
    }

    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn director(&self) -> &LevelDirector {
        &self.director
    }

    pub fn participant(&self) -> Option<&str> {
        self.participant.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// (1-based task number, total tasks). Stays on the last task once the
    /// study is complete.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.catalog.len();
        let current = self.director.index().map_or(total, |i| i + 1);
        (current, total)
    }

    pub fn is_complete(&self) -> bool {
        self.director.is_complete()
    }

    /// Run a gesture through the active level. `None` when input is closed
    /// or the gesture means nothing here; nothing is logged in that case.
    pub fn dispatch(&mut self, gesture: Gesture, at: i64, alarm: &dyn Alarm) -> Option<Outcome> {
        if !self.director.accepts_input() {
            debug!("Input closed, dropping {:?}", gesture);
            return None;
        }
        let level = self.level()?;
        let transition = process(&self.puzzle, level, gesture, at)?;

        self.puzzle = transition.next;
        let logged = match transition.event {
            Some(event) => {
                debug!("Logged {} {:?} {:?}", event.action, event.error, event.context);
                self.log.append(event);
                true
            }
            None => false,
        };
        if transition.completed {
            self.director.record_completion(alarm);
        }

        Some(Outcome {
            logged,
            completed: transition.completed,
            rejected: transition.rejected,
        })
    }

    /// Deliver the alarm's completion signal.
    pub fn signal(&mut self) -> Advance {
        let advance = self.director.on_signal();
        self.enter(advance);
        advance
    }

    /// Subject dismissed the success banner.
    pub fn acknowledge(&mut self) -> Advance {
        let advance = self.director.acknowledge();
        self.enter(advance);
        advance
    }

    fn enter(&mut self, advance: Advance) {
        if let Advance::Next(index) = advance
            && let Some(level) = self.catalog.get(index)
        {
            self.puzzle = level.initial_state();
            info!("Entered {} ({})", level.id, level.title);
        }
    }
}
