// Export our modules for use in the binary and tests
pub mod api;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod domain;
pub mod fetch;
pub mod poll;

pub use controller::Controller;
pub use dashboard::{Dashboard, View};
pub use domain::{Catalog, StateStat, SummaryStat};
