mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use india_internship_map::api::{HttpMapApi, MapApi};
use india_internship_map::config::init_app_config;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    // CLI flags override .env and the environment
    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.wants_headless() || !is_terminal();
    logging::init(&config, headless)?;
    tracing::info!(
        api = %config.api_base_url,
        interval_secs = config.poll_interval.as_secs(),
        headless,
        "starting india-internship-map"
    );

    let api: Arc<dyn MapApi> = Arc::new(HttpMapApi::new(
        &config.api_base_url,
        config.request_timeout,
    )?);

    if headless {
        return event::run_headless(api, &config, args.json).await;
    }

    let mut app = App::new(&config, api);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Stop polling before handing the terminal back
    app.stop();
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
