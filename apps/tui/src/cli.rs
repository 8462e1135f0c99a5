use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "india-internship-map",
    version,
    about = "Live map of internship statistics across Indian states"
)]
pub struct CliArgs {
    /// Print statistics once and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the poll interval
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Override the request timeout
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// State selected on startup
    #[arg(long, value_name = "CODE")]
    pub state: Option<String>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json
    }

    /// Exports flags as the environment variables the config reads, so CLI
    /// values win over `.env`.
    pub fn apply_env_overrides(&self) {
        for (key, value) in self.env_overrides() {
            std::env::set_var(key, value);
        }
    }

    fn env_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(url) = &self.api_url {
            overrides.push(("API_BASE_URL", url.clone()));
        }
        if let Some(secs) = self.interval {
            overrides.push(("POLL_INTERVAL_SECS", secs.to_string()));
        }
        if let Some(secs) = self.timeout {
            overrides.push(("REQUEST_TIMEOUT_SECS", secs.to_string()));
        }
        if let Some(state) = &self.state {
            overrides.push(("INITIAL_STATE", state.clone()));
        }
        if let Some(path) = &self.log_file {
            overrides.push(("LOG_FILE", path.clone()));
        }
        if self.debug {
            overrides.push(("DEBUG", "1".to_string()));
        }
        overrides
    }
}
