//! Vessel Detection Rules & Thresholds
//!
//! Thresholds for the dark/suspicious checks.
//! No classify logic here - constants and config only.

use chrono::Duration;
use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS (Constants)
// ============================================================================

/// AIS silence longer than this marks a vessel dark
pub const SIGNAL_GAP_HOURS: i64 = 12;

/// A fix newer than this counts as "previously active"
pub const RECENT_ACTIVITY_HOURS: i64 = 12;

/// Lat/lng change considered real movement (roughly 100 m)
pub const POSITION_CHANGE_THRESHOLD_DEG: f64 = 0.001;

/// Most recent fixes inspected by the movement checks
pub const HISTORY_WINDOW: usize = 3;

/// Max - min reported speed across the window
pub const MAX_SPEED_SPREAD_KNOTS: f64 = 20.0;

/// Implied vs reported speed
pub const MAX_SPEED_MISMATCH_KNOTS: f64 = 15.0;

// ============================================================================
// PHYSICAL CONSTANTS
// ============================================================================

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// km/h -> knots
pub const KMH_TO_KNOTS: f64 = 0.539957;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Thresholds for classification (configurable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    /// Silence longer than this = dark
    pub signal_gap_hours: i64,
    /// Window for the no-AIS-match check
    pub recent_activity_hours: i64,
    /// Degrees of lat or lng counted as movement
    pub position_change_deg: f64,
    /// How many recent fixes the movement checks look at
    pub history_window: usize,
    pub max_speed_spread_knots: f64,
    pub max_speed_mismatch_knots: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            signal_gap_hours: SIGNAL_GAP_HOURS,
            recent_activity_hours: RECENT_ACTIVITY_HOURS,
            position_change_deg: POSITION_CHANGE_THRESHOLD_DEG,
            history_window: HISTORY_WINDOW,
            max_speed_spread_knots: MAX_SPEED_SPREAD_KNOTS,
            max_speed_mismatch_knots: MAX_SPEED_MISMATCH_KNOTS,
        }
    }
}

impl DetectionThresholds {
    /// High sensitivity - shorter gap, tighter speed bands, more alerts
    pub fn high_sensitivity() -> Self {
        Self {
            signal_gap_hours: 6,
            max_speed_spread_knots: 15.0,
            max_speed_mismatch_knots: 10.0,
            ..Default::default()
        }
    }

    /// Low sensitivity - longer gap, wider speed bands, fewer alerts
    pub fn low_sensitivity() -> Self {
        Self {
            signal_gap_hours: 24,
            max_speed_spread_knots: 30.0,
            max_speed_mismatch_knots: 25.0,
            ..Default::default()
        }
    }

    /// Look up a preset by name (`default`, `high`, `low`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "default" | "normal" => Some(Self::default()),
            "high" => Some(Self::high_sensitivity()),
            "low" => Some(Self::low_sensitivity()),
            _ => None,
        }
    }

    /// `None` when the hour count does not fit a `Duration`
    pub fn signal_gap(&self) -> Option<Duration> {
        Duration::try_hours(self.signal_gap_hours)
    }

    /// `None` when the hour count does not fit a `Duration`
    pub fn recent_activity(&self) -> Option<Duration> {
        Duration::try_hours(self.recent_activity_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = DetectionThresholds::default();
        assert_eq!(t.signal_gap(), Some(Duration::hours(12)));
        assert_eq!(t.history_window, 3);
        assert_eq!(t.position_change_deg, 0.001);
    }

    #[test]
    fn test_out_of_range_hours() {
        let t = DetectionThresholds {
            signal_gap_hours: i64::MAX,
            recent_activity_hours: i64::MIN,
            ..Default::default()
        };
        assert_eq!(t.signal_gap(), None);
        assert_eq!(t.recent_activity(), None);
    }

    #[test]
    fn test_presets() {
        assert!(DetectionThresholds::high_sensitivity().signal_gap_hours < SIGNAL_GAP_HOURS);
        assert!(DetectionThresholds::low_sensitivity().signal_gap_hours > SIGNAL_GAP_HOURS);
        assert_eq!(DetectionThresholds::preset("HIGH"), Some(DetectionThresholds::high_sensitivity()));
        assert_eq!(DetectionThresholds::preset("default"), Some(DetectionThresholds::default()));
        assert_eq!(DetectionThresholds::preset("extreme"), None);
    }
}
