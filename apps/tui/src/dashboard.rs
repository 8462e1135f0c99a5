use crate::domain::{Catalog, StateStat, SummaryStat};
use crate::fetch::{FetchEvent, FetchFailure};
use chrono::{DateTime, Local};
use std::borrow::Cow;

/// Which top-level view the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// A cycle is running and none has completed yet.
    Loading,
    /// The last cycle failed.
    Error,
    Loaded,
}

/// One region's payload as handed to the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapDatum<'a> {
    pub code: &'a str,
    pub stats: &'a StateStat,
}

/// Everything the views render. Only fetch events and user selection
/// change it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    catalog: Catalog,
    summary: Option<SummaryStat>,
    selected: String,
    loading: bool,
    in_flight: bool,
    error: Option<FetchFailure>,
    last_updated: Option<DateTime<Local>>,
    database_empty: bool,
}

impl Dashboard {
    pub fn new(initial_state: &str) -> Self {
        Self {
            catalog: Catalog::initial(),
            summary: None,
            selected: initial_state.to_string(),
            loading: true,
            in_flight: false,
            error: None,
            last_updated: None,
            database_empty: true,
        }
    }

    /// Marks a cycle as started. Returns `false` when one is already
    /// running, in which case the caller must not start another.
    pub fn begin_cycle(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.loading = true;
        self.error = None;
        true
    }

    pub fn apply(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::StatesLoaded { catalog, empty } => {
                self.catalog = catalog;
                self.database_empty = empty;
            }
            FetchEvent::SummaryLoaded(summary) => {
                self.summary = Some(summary);
            }
            FetchEvent::Completed(at) => {
                self.last_updated = Some(at);
                self.error = None;
                self.finish_cycle();
            }
            FetchEvent::Failed(failure) => {
                self.error = Some(failure);
                self.finish_cycle();
            }
        }
    }

    fn finish_cycle(&mut self) {
        self.loading = false;
        self.in_flight = false;
    }

    pub const fn view(&self) -> View {
        if self.loading && self.last_updated.is_none() {
            View::Loading
        } else if self.error.is_some() {
            View::Error
        } else {
            View::Loaded
        }
    }

    /// Hover callback target. Any code is accepted; unknown ones render as
    /// the placeholder.
    pub fn select(&mut self, code: &str) {
        if self.selected != code {
            self.selected = code.to_string();
        }
    }

    pub fn selected_code(&self) -> &str {
        &self.selected
    }

    pub fn selected_stats(&self) -> Cow<'_, StateStat> {
        self.catalog
            .get(&self.selected)
            .map_or_else(|| Cow::Owned(StateStat::placeholder()), Cow::Borrowed)
    }

    pub fn map_data(&self) -> Vec<MapDatum<'_>> {
        self.catalog
            .iter()
            .map(|(code, stats)| MapDatum { code, stats })
            .collect()
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn summary(&self) -> Option<&SummaryStat> {
        self.summary.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn error(&self) -> Option<&FetchFailure> {
        self.error.as_ref()
    }

    pub const fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub const fn is_database_empty(&self) -> bool {
        self.database_empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_STATE;
    use crate::fetch::tests::{delhi_catalog, sample_summary};
    use crate::fetch::BACKEND_UNAVAILABLE;

    fn failure() -> FetchFailure {
        FetchFailure {
            message: BACKEND_UNAVAILABLE.to_string(),
            detail: "connection refused".to_string(),
        }
    }

    fn completed(dashboard: &mut Dashboard, catalog: Catalog) {
        assert!(dashboard.begin_cycle());
        let empty = catalog.is_database_empty();
        dashboard.apply(FetchEvent::StatesLoaded { catalog, empty });
        dashboard.apply(FetchEvent::SummaryLoaded(sample_summary()));
        dashboard.apply(FetchEvent::Completed(Local::now()));
    }

    #[test]
    fn starts_with_zeroed_catalog_and_default_selection() {
        let dashboard = Dashboard::new(DEFAULT_STATE);

        assert_eq!(dashboard.catalog().len(), 36);
        assert_eq!(dashboard.selected_code(), "IN-MH");
        assert_eq!(dashboard.selected_stats().name, "Maharashtra");
        assert!(dashboard.is_database_empty());
        assert!(dashboard.summary().is_none());
        assert_eq!(dashboard.view(), View::Loading);
    }

    #[test]
    fn happy_path_shows_loaded_view_with_selected_state() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);

        completed(&mut dashboard, delhi_catalog());
        dashboard.select("IN-DL");

        assert_eq!(dashboard.view(), View::Loaded);
        assert!(!dashboard.is_database_empty());
        assert!(!dashboard.is_loading());
        assert!(dashboard.last_updated().is_some());
        assert_eq!(dashboard.summary().map(|s| s.total_companies), Some(5));
        assert_eq!(dashboard.selected_stats().students_hired, 4);
    }

    #[test]
    fn partial_response_replaces_catalog_wholesale() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);
        let partial: Catalog = Catalog::initial()
            .iter()
            .take(10)
            .map(|(code, stats)| {
                let mut stats = stats.clone();
                stats.companies = 2;
                (code.to_string(), stats)
            })
            .collect();

        completed(&mut dashboard, partial.clone());

        assert_eq!(dashboard.catalog(), &partial);
        assert_eq!(dashboard.map_data().len(), 10);
        // IN-MH is not among the first ten codes.
        assert_eq!(dashboard.selected_stats().name, "State");
        assert_eq!(dashboard.selected_stats().companies, 0);
    }

    #[test]
    fn unknown_selection_uses_placeholder() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);
        dashboard.select("not-a-state");

        let stats = dashboard.selected_stats();
        assert_eq!(stats.name, "State");
        assert_eq!(stats.as_ref(), &StateStat::placeholder());
    }

    #[test]
    fn failure_shows_error_view_even_after_success() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);
        completed(&mut dashboard, delhi_catalog());

        assert!(dashboard.begin_cycle());
        assert_eq!(dashboard.view(), View::Loaded);
        dashboard.apply(FetchEvent::Failed(failure()));

        assert_eq!(dashboard.view(), View::Error);
        assert_eq!(dashboard.error(), Some(&failure()));
        // Stale data stays in place behind the error.
        assert_eq!(dashboard.catalog(), &delhi_catalog());
    }

    #[test]
    fn first_load_failure_then_retry_goes_back_to_loading() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);
        assert!(dashboard.begin_cycle());
        dashboard.apply(FetchEvent::Failed(failure()));
        assert_eq!(dashboard.view(), View::Error);

        assert!(dashboard.begin_cycle());
        assert_eq!(dashboard.view(), View::Loading);
        assert!(dashboard.error().is_none());
        // The retried cycle is the one in flight; a second one is refused.
        assert!(!dashboard.begin_cycle());

        dashboard.apply(FetchEvent::StatesLoaded {
            catalog: Catalog::initial(),
            empty: true,
        });
        dashboard.apply(FetchEvent::SummaryLoaded(sample_summary()));
        dashboard.apply(FetchEvent::Completed(Local::now()));
        assert_eq!(dashboard.view(), View::Loaded);
        assert!(dashboard.is_database_empty());
    }

    #[test]
    fn only_one_cycle_runs_at_a_time() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);

        assert!(dashboard.begin_cycle());
        assert!(!dashboard.begin_cycle());

        dashboard.apply(FetchEvent::Completed(Local::now()));
        assert!(dashboard.begin_cycle());
    }

    #[test]
    fn soft_summary_failure_keeps_previous_summary() {
        let mut dashboard = Dashboard::new(DEFAULT_STATE);
        completed(&mut dashboard, delhi_catalog());

        assert!(dashboard.begin_cycle());
        dashboard.apply(FetchEvent::StatesLoaded {
            catalog: Catalog::initial(),
            empty: true,
        });
        dashboard.apply(FetchEvent::Completed(Local::now()));

        assert_eq!(dashboard.summary(), Some(&sample_summary()));
        assert!(dashboard.is_database_empty());
        assert_eq!(dashboard.view(), View::Loaded);
    }
}
