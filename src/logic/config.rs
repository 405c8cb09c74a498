//! Monitor Configuration
//!
//! Loaded from environment variables (optionally seeded from `.env`),
//! with defaults from `constants`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    env_value, get_feed_path, get_sensitivity, DEFAULT_POLL_INTERVAL_SECS, ENV_MAX_CYCLES,
    ENV_PARALLEL, ENV_POLL_INTERVAL, ENV_REPORT_PATH, ENV_SENSITIVITY,
};
use crate::logic::vessel::DetectionThresholds;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name}: expected {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Vessel snapshot file read each cycle
    pub feed_path: PathBuf,

    /// Time between polling cycles
    pub poll_interval: Duration,

    /// Detection thresholds (from the sensitivity preset)
    pub thresholds: DetectionThresholds,

    /// Classify the batch on the rayon pool
    pub parallel: bool,

    /// Stop after this many cycles (None = run forever)
    pub max_cycles: Option<u64>,

    /// Write each cycle report here as JSON
    pub report_path: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from(crate::constants::DEFAULT_FEED_PATH),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            thresholds: DetectionThresholds::default(),
            parallel: true,
            max_cycles: None,
            report_path: None,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let sensitivity = get_sensitivity();
        let thresholds =
            DetectionThresholds::preset(&sensitivity).ok_or_else(|| ConfigError::InvalidValue {
                name: ENV_SENSITIVITY,
                expected: "default, high or low",
                value: sensitivity.clone(),
            })?;

        let poll_secs = parse_env(ENV_POLL_INTERVAL, "a number of seconds", |v| {
            v.parse::<u64>().ok().filter(|s| *s > 0)
        })?
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        let parallel = parse_env(ENV_PARALLEL, "true or false", parse_bool)?.unwrap_or(true);

        let max_cycles = parse_env(ENV_MAX_CYCLES, "a positive number", |v| {
            v.parse::<u64>().ok().filter(|n| *n > 0)
        })?;

        Ok(Self {
            feed_path: PathBuf::from(get_feed_path()),
            poll_interval: Duration::from_secs(poll_secs),
            thresholds,
            parallel,
            max_cycles,
            report_path: env_value(ENV_REPORT_PATH).map(PathBuf::from),
        })
    }
}

fn parse_env<T>(
    name: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env_value(name) {
        None => Ok(None),
        Some(value) => parse(&value).map(Some).ok_or(ConfigError::InvalidValue {
            name,
            expected,
            value,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
