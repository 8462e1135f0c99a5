use color_eyre::eyre::eyre;
use color_eyre::Result;
use india_internship_map::config::AppConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    File(PathBuf),
    /// The terminal belongs to the UI and no log file was given.
    Off,
}

pub fn log_output(config: &AppConfig, headless: bool) -> LogOutput {
    match (&config.log_file, headless) {
        (Some(path), _) => LogOutput::File(path.clone()),
        (None, true) => LogOutput::Stderr,
        (None, false) => LogOutput::Off,
    }
}

fn default_directives(debug: bool) -> &'static str {
    if debug {
        "debug,hyper=info,reqwest=info"
    } else {
        "info"
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `--debug`.
pub fn init(config: &AppConfig, headless: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(config.debug)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match log_output(config, headless) {
        LogOutput::Off => return Ok(()),
        LogOutput::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogOutput::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| eyre!("Failed to initialise logging: {e}"))
}
