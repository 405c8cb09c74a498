//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults and the
//! environment variable names that override them.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Darkwatch";

/// Default vessel snapshot file
pub const DEFAULT_FEED_PATH: &str = "vessels.json";

/// Default polling interval (seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Default threshold preset
pub const DEFAULT_SENSITIVITY: &str = "default";

// ============================================
// Environment variable names
// ============================================

pub const ENV_FEED_PATH: &str = "DARKWATCH_FEED_PATH";
pub const ENV_POLL_INTERVAL: &str = "DARKWATCH_POLL_INTERVAL_SECS";
pub const ENV_SENSITIVITY: &str = "DARKWATCH_SENSITIVITY";
pub const ENV_PARALLEL: &str = "DARKWATCH_PARALLEL";
pub const ENV_MAX_CYCLES: &str = "DARKWATCH_MAX_CYCLES";
pub const ENV_REPORT_PATH: &str = "DARKWATCH_REPORT_PATH";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Raw env value, `None` when unset or blank
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get feed path from environment or use default
pub fn get_feed_path() -> String {
    env_value(ENV_FEED_PATH).unwrap_or_else(|| DEFAULT_FEED_PATH.to_string())
}

/// Get sensitivity preset name from environment or use default
pub fn get_sensitivity() -> String {
    env_value(ENV_SENSITIVITY).unwrap_or_else(|| DEFAULT_SENSITIVITY.to_string())
}
