use crate::domain::{is_known_state, DEFAULT_STATE};
use crate::poll::DEFAULT_POLL_INTERVAL;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },

    #[error("{var} must be at least one second")]
    ZeroSeconds { var: &'static str },

    #[error("unknown state code {0:?} (expected a code such as IN-MH)")]
    UnknownState(String),

    #[error("API_BASE_URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

/// Runtime settings, resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub initial_state: String,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            initial_state: DEFAULT_STATE.to_string(),
            log_file: None,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from any key lookup. Unset keys keep their
    /// defaults; set keys are validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        let poll_interval = seconds(&lookup, "POLL_INTERVAL_SECS")?.unwrap_or(defaults.poll_interval);
        let request_timeout =
            seconds(&lookup, "REQUEST_TIMEOUT_SECS")?.unwrap_or(defaults.request_timeout);

        let initial_state = lookup("INITIAL_STATE")
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .unwrap_or(defaults.initial_state);
        if !is_known_state(&initial_state) {
            return Err(ConfigError::UnknownState(initial_state));
        }

        let log_file = lookup("LOG_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let debug = lookup("DEBUG").is_some_and(|value| !matches!(value.trim(), "" | "0" | "false"));

        Ok(Self {
            api_base_url,
            poll_interval,
            request_timeout,
            initial_state,
            log_file,
            debug,
        })
    }
}

fn seconds<F>(lookup: &F, var: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeconds {
            var,
            value: value.clone(),
        })?;
    if secs == 0 {
        return Err(ConfigError::ZeroSeconds { var });
    }

    Ok(Some(Duration::from_secs(secs)))
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), Ok(AppConfig::default()));
    }

    #[test]
    fn reads_every_setting() {
        let config = config_from(&[
            ("API_BASE_URL", "https://stats.example.org/"),
            ("POLL_INTERVAL_SECS", "45"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("INITIAL_STATE", "in-ka"),
            ("LOG_FILE", "/tmp/map.log"),
            ("DEBUG", "1"),
        ]);

        assert_eq!(
            config,
            Ok(AppConfig {
                api_base_url: "https://stats.example.org".to_string(),
                poll_interval: Duration::from_secs(45),
                request_timeout: Duration::from_secs(3),
                initial_state: "IN-KA".to_string(),
                log_file: Some(PathBuf::from("/tmp/map.log")),
                debug: true,
            })
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config_from(&[("POLL_INTERVAL_SECS", "soon")]),
            Err(ConfigError::InvalidSeconds {
                var: "POLL_INTERVAL_SECS",
                value: "soon".to_string()
            })
        );
        assert_eq!(
            config_from(&[("REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::ZeroSeconds {
                var: "REQUEST_TIMEOUT_SECS"
            })
        );
        assert_eq!(
            config_from(&[("INITIAL_STATE", "IN-XX")]),
            Err(ConfigError::UnknownState("IN-XX".to_string()))
        );
        assert!(matches!(
            config_from(&[("API_BASE_URL", "localhost:8000")]),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn debug_flag_accepts_falsey_values() {
        assert_eq!(config_from(&[("DEBUG", "0")]).map(|c| c.debug), Ok(false));
        assert_eq!(config_from(&[("DEBUG", "false")]).map(|c| c.debug), Ok(false));
        assert_eq!(config_from(&[("DEBUG", "yes")]).map(|c| c.debug), Ok(true));
    }
}
