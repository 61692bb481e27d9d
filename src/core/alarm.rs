//! # Alarm
//!
//! Deferred, single-shot completion signal. When a level's goal is met the
//! director asks an `Alarm` to deliver `Action::CompletionSignal` after a
//! short delay, so the last action's feedback plays before anything changes.
//!
//! Implementations must fire exactly once per `schedule` call and cannot be
//! cancelled. The core never waits on the alarm; it only blocks input until
//! the signal comes back through `update`.

use std::time::Duration;

pub trait Alarm {
    fn schedule(&self, delay: Duration);
}

