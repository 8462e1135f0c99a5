use crate::app::navigation::{cycle, neighbor, Heading};
use crate::app::search::SearchState;
use india_internship_map::api::MapApi;
use india_internship_map::config::AppConfig;
use india_internship_map::{Controller, Dashboard, View};
use ratatui::layout::Rect;
use std::cell::Cell;
use std::sync::Arc;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

/// How often the spinners advance one frame.
const SPINNER_STEP: Duration = Duration::from_millis(120);

pub struct App {
    pub running: bool,
    pub controller: Controller,
    pub poll_interval: Duration,
    pub api_base_url: String,
    pub show_help: bool,
    pub search: Option<SearchState>,
    pub status_message: String,
    pub throbber: ThrobberState,
    pub last_frame: Instant,
    spinner_elapsed: Duration,
    /// Inner area of the map as last drawn, for mouse hit testing.
    pub map_area: Cell<Option<Rect>>,
}

impl App {
    pub fn new(config: &AppConfig, api: Arc<dyn MapApi>) -> Self {
        let dashboard = Dashboard::new(&config.initial_state);

        Self {
            running: true,
            controller: Controller::new(api, dashboard),
            poll_interval: config.poll_interval,
            api_base_url: config.api_base_url.clone(),
            show_help: false,
            search: None,
            status_message: String::new(),
            throbber: ThrobberState::default(),
            last_frame: Instant::now(),
            spinner_elapsed: Duration::ZERO,
            map_area: Cell::new(None),
        }
    }

    /// Begins polling; the first cycle starts on the next [`App::update`].
    pub fn start(&mut self) {
        self.controller.activate(self.poll_interval);
        self.status_message = format!(
            "Polling {} every {}s",
            self.api_base_url,
            self.poll_interval.as_secs()
        );
    }

    pub fn stop(&mut self) {
        self.controller.deactivate();
    }

    /// Applies fetch progress and advances the spinners. Called once per
    /// frame.
    pub fn update(&mut self) {
        if self.controller.pump() {
            self.sync_status();
        }

        let now = Instant::now();
        self.spinner_elapsed += now.duration_since(self.last_frame);
        self.last_frame = now;

        while self.spinner_elapsed >= SPINNER_STEP {
            self.spinner_elapsed -= SPINNER_STEP;
            self.throbber.calc_next();
        }
    }

    fn sync_status(&mut self) {
        let dashboard = self.controller.dashboard();
        if dashboard.is_loading() {
            return;
        }
        self.status_message = match (dashboard.error(), dashboard.last_updated()) {
            (Some(_), _) => "Last refresh failed. Press r to retry".to_string(),
            (None, Some(at)) => format!("Updated at {}", at.format("%H:%M:%S")),
            (None, None) => String::new(),
        };
    }

    pub const fn dashboard(&self) -> &Dashboard {
        self.controller.dashboard()
    }

    pub fn refresh(&mut self) {
        if self.controller.refresh() {
            self.status_message = "Refreshing...".to_string();
        } else {
            self.status_message = "Refresh already in progress".to_string();
        }
    }

    /// Hover callback from the map.
    pub fn hover_state(&mut self, code: &str) {
        self.controller.dashboard_mut().select(code);
    }

    pub fn move_selection(&mut self, heading: Heading) {
        let from = self.dashboard().selected_code().to_string();
        if let Some(code) = neighbor(&from, heading) {
            self.hover_state(code);
        }
    }

    pub fn cycle_selection(&mut self, forward: bool) {
        let next = cycle(self.dashboard().selected_code(), forward);
        self.hover_state(next);
    }

    pub fn open_search(&mut self) {
        self.search = Some(SearchState::default());
    }

    pub fn close_search(&mut self) {
        self.search = None;
    }

    /// Selects the highlighted match and closes the prompt.
    pub fn submit_search(&mut self) {
        let Some(search) = self.search.take() else {
            return;
        };
        match search.choice() {
            Some(region) => {
                self.hover_state(region.code);
                self.status_message = format!("Selected {}", region.name);
            }
            None => {
                self.status_message = format!("No state matches \"{}\"", search.query);
            }
        }
    }

    pub fn is_showing(&self, view: View) -> bool {
        self.dashboard().view() == view
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
