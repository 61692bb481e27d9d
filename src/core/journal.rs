//! # Session Log (journal)
//!
//! The experimental record: one `LogEvent` per processed action, in arrival
//! order. Entries are never edited or removed once appended.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::core::level::LevelId;
use crate::core::ring::RingId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Push,
    Pop,
    Move,
    Error,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Push => "PUSH",
            ActionKind::Pop => "POP",
            ActionKind::Move => "MOVE",
            ActionKind::Error => "ERROR",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    LifoViolation,
    CapacityFull,
    StackUnderflow,
    BlockedByTop,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::LifoViolation => "LIFO_VIOLATION",
            ErrorKind::CapacityFull => "CAPACITY_FULL",
            ErrorKind::StackUnderflow => "STACK_UNDERFLOW",
            ErrorKind::BlockedByTop => "BLOCKED_BY_TOP",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub id: Uuid,
    pub level: LevelId,
    /// Unix time in milliseconds.
    pub timestamp: i64,
    pub action: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Ring the action targeted, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring: Option<RingId>,
}

impl LogEvent {
    pub fn is_error(&self) -> bool {
        self.action == ActionKind::Error
    }

    pub fn is_error_kind(&self, kind: ErrorKind) -> bool {
        self.error == Some(kind)
    }
}

/// Append-only event sequence with a running error count.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    events: Vec<LogEvent>,
    errors: usize,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: LogEvent) -> &LogEvent {
        if event.is_error() {
            self.errors += 1;
        }
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&LogEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn errors_by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for kind in self.events.iter().filter_map(|e| e.error) {
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }

    /// Events belonging to one level, in order.
    pub fn for_level<'a>(&'a self, level: &'a LevelId) -> impl Iterator<Item = &'a LogEvent> {
        self.events.iter().filter(move |e| &e.level == level)
    }
}
