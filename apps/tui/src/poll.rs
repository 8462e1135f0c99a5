use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Why a fetch cycle was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Scheduled,
    Manual,
}

/// Sends [`Trigger::Scheduled`] once on start and then once per period.
pub struct PollScheduler;

impl PollScheduler {
    pub fn start(period: Duration, triggers: UnboundedSender<Trigger>) -> PollHandle {
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                if triggers.send(Trigger::Scheduled).is_err() {
                    tracing::debug!("trigger receiver dropped, stopping poll loop");
                    break;
                }
            }
        });

        tracing::debug!(period_secs = period.as_secs(), "poll scheduler started");
        PollHandle { task: Some(task) }
    }
}

/// Owns the polling task. Cancelling (or dropping) the handle stops further
/// triggers; cycles that already started are left to finish.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("poll scheduler cancelled");
        }
    }

    pub const fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
