//! One fetch cycle: per-state statistics, then the summary.
//!
//! The cycle never touches dashboard state directly. It reports what happened
//! as [`FetchEvent`]s in order, and the UI loop applies them.

use crate::api::MapApi;
use crate::domain::{Catalog, SummaryStat};
use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedSender;

pub const BACKEND_UNAVAILABLE: &str =
    "Cannot connect to backend. Please ensure the backend server is running.";

#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    StatesLoaded { catalog: Catalog, empty: bool },
    SummaryLoaded(SummaryStat),
    Completed(DateTime<Local>),
    Failed(FetchFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Shown to the user.
    pub message: String,
    /// Underlying cause, shown under the message.
    pub detail: String,
}

impl FetchFailure {
    fn backend_unavailable(detail: &impl std::fmt::Display) -> Self {
        Self {
            message: BACKEND_UNAVAILABLE.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Runs a cycle, sending each event as soon as it is known.
///
/// A failed per-state request ends the cycle before the summary is
/// requested. A non-success status on the summary keeps the previous
/// summary and still completes the cycle. If the receiver is gone the
/// cycle stops at the next event.
pub async fn run_cycle(api: &dyn MapApi, events: &UnboundedSender<FetchEvent>) {
    let emit = |event: FetchEvent| {
        let delivered = events.send(event).is_ok();
        if !delivered {
            tracing::debug!("dashboard closed, discarding fetch results");
        }
        delivered
    };

    let catalog = match api.state_statistics().await {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::error!(%error, "state statistics request failed");
            emit(FetchEvent::Failed(FetchFailure::backend_unavailable(&error)));
            return;
        }
    };

    let empty = catalog.is_database_empty();
    if empty {
        tracing::warn!(states = catalog.len(), "database is empty, showing zero values");
    } else {
        tracing::debug!(states = catalog.len(), "received live state statistics");
    }
    if !emit(FetchEvent::StatesLoaded { catalog, empty }) {
        return;
    }

    match api.statistics_summary().await {
        Ok(summary) => {
            if !emit(FetchEvent::SummaryLoaded(summary)) {
                return;
            }
        }
        Err(error) if error.is_status() => {
            tracing::warn!(%error, "summary unavailable, keeping previous values");
        }
        Err(error) => {
            tracing::error!(%error, "summary request failed");
            emit(FetchEvent::Failed(FetchFailure::backend_unavailable(&error)));
            return;
        }
    }

    let now = Local::now();
    tracing::info!(at = %now.format("%H:%M:%S"), "statistics refreshed");
    emit(FetchEvent::Completed(now));
}
