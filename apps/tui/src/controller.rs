use crate::api::MapApi;
use crate::dashboard::Dashboard;
use crate::fetch::{run_cycle, FetchEvent};
use crate::poll::{PollHandle, PollScheduler, Trigger};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Wires the poll scheduler and fetch cycles to a [`Dashboard`].
///
/// Triggers and fetch events arrive over channels and are applied in
/// [`Controller::pump`], so the dashboard is only ever mutated by whoever
/// owns the controller.
pub struct Controller {
    api: Arc<dyn MapApi>,
    dashboard: Dashboard,
    triggers_tx: UnboundedSender<Trigger>,
    triggers_rx: UnboundedReceiver<Trigger>,
    events_tx: UnboundedSender<FetchEvent>,
    events_rx: UnboundedReceiver<FetchEvent>,
    poll: Option<PollHandle>,
    cycles_started: u64,
}

impl Controller {
    pub fn new(api: Arc<dyn MapApi>, dashboard: Dashboard) -> Self {
        let (triggers_tx, triggers_rx) = unbounded_channel();
        let (events_tx, events_rx) = unbounded_channel();

        Self {
            api,
            dashboard,
            triggers_tx,
            triggers_rx,
            events_tx,
            events_rx,
            poll: None,
            cycles_started: 0,
        }
    }

    /// Starts polling. The first cycle is requested immediately.
    pub fn activate(&mut self, period: Duration) {
        if self.poll.is_none() {
            self.poll = Some(PollScheduler::start(period, self.triggers_tx.clone()));
        }
    }

    pub fn deactivate(&mut self) {
        if let Some(mut poll) = self.poll.take() {
            poll.cancel();
        }
    }

    pub const fn is_active(&self) -> bool {
        self.poll.is_some()
    }

    /// Starts a cycle outside the poll schedule (retry / refresh).
    /// Returns `false` when a cycle is already running.
    pub fn refresh(&mut self) -> bool {
        self.start_cycle(Trigger::Manual)
    }

    /// Applies pending fetch events, then starts a cycle for pending
    /// triggers. Returns `true` when the dashboard changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = self.apply_pending_events();

        let mut triggers = Vec::new();
        while let Ok(trigger) = self.triggers_rx.try_recv() {
            triggers.push(trigger);
        }
        for trigger in triggers {
            changed |= self.start_cycle(trigger);
        }

        changed
    }

    fn apply_pending_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dashboard.apply(event);
            changed = true;
        }
        changed
    }

    fn start_cycle(&mut self, trigger: Trigger) -> bool {
        if !self.dashboard.begin_cycle() {
            tracing::debug!(?trigger, "fetch already in flight, skipping trigger");
            return false;
        }

        self.cycles_started += 1;
        tracing::debug!(?trigger, cycle = self.cycles_started, "starting fetch cycle");

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            run_cycle(api.as_ref(), &events).await;
        });
        true
    }

    /// Runs one cycle to completion on the current task. Used when there
    /// is no UI loop to pump events.
    pub async fn run_once(&mut self) -> &Dashboard {
        if self.dashboard.begin_cycle() {
            self.cycles_started += 1;
            run_cycle(self.api.as_ref(), &self.events_tx).await;
        }
        self.apply_pending_events();
        &self.dashboard
    }

    pub const fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub const fn cycles_started(&self) -> u64 {
        self.cycles_started
    }
}
