use std::sync::mpsc;
use std::time::Duration;

use crate::core::action::Action;
use crate::core::alarm::Alarm;

/// Delivers `Action::CompletionSignal` back to the event loop after the
/// requested delay, on a tokio task.
pub struct TokioAlarm {
    tx: mpsc::Sender<Action>,
}

impl TokioAlarm {
    pub fn new(tx: mpsc::Sender<Action>) -> Self {
        Self { tx }
    }
}

impl Alarm for TokioAlarm {
    fn schedule(&self, delay: Duration) {
        let tx = self.tx.clone();
        log::debug!("Completion signal scheduled in {:?}", delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Action::CompletionSignal).is_err() {
                log::warn!("Completion signal dropped: event loop is gone");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_signal_arrives_after_delay() {
        let (tx, rx) = mpsc::channel();
        let alarm = TokioAlarm::new(tx);
        alarm.schedule(Duration::from_millis(500));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv(), Ok(Action::CompletionSignal));
        assert!(rx.try_recv().is_err());
    }
}
