//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use crate::core::alarm::Alarm;
use crate::core::level::{LevelCatalog, Rules};
use crate::core::session::{Session, SessionOptions};

/// An alarm that never fires, it only remembers what was asked of it.
#[derive(Default)]
pub struct RecordingAlarm {
    calls: RefCell<Vec<Duration>>,
}

impl RecordingAlarm {
    pub fn scheduled(&self) -> Vec<Duration> {
        self.calls.borrow().clone()
    }
}

impl Alarm for RecordingAlarm {
    fn schedule(&self, delay: Duration) {
        self.calls.borrow_mut().push(delay);
    }
}

/// Creates a session over the standard catalog with default rules.
pub fn test_session() -> Session {
    Session::new(
        Arc::new(LevelCatalog::standard(&Rules::default())),
        SessionOptions {
            completion_delay: Duration::from_millis(500),
            auto_advance: false,
            participant: Some("tester".to_string()),
        },
    )
}
