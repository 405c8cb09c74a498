//! Vessel Checks
//!
//! The individual evidence rules. Each check looks at one aspect of the
//! record and returns at most one `Finding`. All of them take the same
//! captured `now` so one classification never re-reads the clock.
//!
//! - signal gap: AIS silence longer than the threshold
//! - zero speed but moving: reported speed 0 while fixes move
//! - erratic movement: speed spread, or implied speed vs reported speed
//! - no AIS match: explicit mismatch for a vessel seen recently

use chrono::{DateTime, Utc};

use super::geo::haversine_km;
use super::rules::{DetectionThresholds, KMH_TO_KNOTS};
use super::types::{Finding, PositionSample, Timestamp};

// ============================================================================
// SIGNAL GAP
// ============================================================================

/// Outcome of the AIS silence check
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GapCheck {
    /// Elapsed hours since the last transmission, crossed or not
    pub hours_since: Option<f64>,
    pub finding: Option<Finding>,
}

pub fn check_signal_gap(
    last_transmission: Option<&Timestamp>,
    now: DateTime<Utc>,
    thresholds: &DetectionThresholds,
) -> GapCheck {
    let Some(last) = last_transmission.and_then(Timestamp::instant) else {
        if let Some(ts) = last_transmission {
            log::debug!("Skipping gap check, unparsable lastAisTransmission {:?}", ts.raw());
        }
        return GapCheck::default();
    };

    let elapsed = now - last;
    let hours = elapsed.num_milliseconds() as f64 / 3_600_000.0;

    let finding = match thresholds.signal_gap() {
        Some(gap) if elapsed > gap => Some(Finding::SignalGap { hours }),
        Some(_) => None,
        None => {
            log::warn!(
                "Skipping gap check, signal_gap_hours {} out of range",
                thresholds.signal_gap_hours
            );
            None
        }
    };

    GapCheck {
        hours_since: Some(hours),
        finding,
    }
}

// ============================================================================
// HISTORY WINDOW
// ============================================================================

/// A fix with its parsed instant
#[derive(Debug, Clone, Copy)]
pub struct TimedSample<'a> {
    pub at: DateTime<Utc>,
    pub sample: &'a PositionSample,
}

/// Newest-first copy of the usable history, cut to `size` entries.
///
/// The record's own list is left untouched. Fixes with malformed timestamps
/// or non-finite values are dropped. Ties keep their input order.
pub fn recent_window(history: &[PositionSample], size: usize) -> Vec<TimedSample<'_>> {
    let mut timed: Vec<TimedSample<'_>> = history
        .iter()
        .filter_map(|sample| {
            sample
                .usable_instant()
                .map(|at| TimedSample { at, sample })
        })
        .collect();

    if timed.len() < history.len() {
        log::debug!(
            "Dropped {} unusable history entries",
            history.len() - timed.len()
        );
    }

    timed.sort_by(|a, b| b.at.cmp(&a.at));
    timed.truncate(size);
    timed
}

// ============================================================================
// MOVEMENT CONSISTENCY
// ============================================================================

/// Reported speed is exactly 0 but consecutive fixes moved
pub fn check_zero_speed_movement(
    current_speed: f64,
    window: &[TimedSample<'_>],
    thresholds: &DetectionThresholds,
) -> Option<Finding> {
    if current_speed != 0.0 || window.len() < 2 {
        return None;
    }

    let limit = thresholds.position_change_deg;
    let moved = window.windows(2).any(|pair| {
        let (prev, curr) = (pair[0].sample, pair[1].sample);
        (prev.lat - curr.lat).abs() > limit || (prev.lng - curr.lng).abs() > limit
    });

    moved.then_some(Finding::ZeroSpeedMovement)
}

/// Speed spread across the window, or implied speed far from reported
pub fn check_erratic_movement(
    window: &[TimedSample<'_>],
    thresholds: &DetectionThresholds,
) -> Option<Finding> {
    if window.len() < 3 {
        return None;
    }

    let (min, max) = window.iter().map(|t| t.sample.speed).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), s| (min.min(s), max.max(s)),
    );
    if max - min > thresholds.max_speed_spread_knots {
        return Some(Finding::ErraticMovement);
    }

    for pair in window.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        let elapsed_secs = (prev.at - curr.at).num_milliseconds() as f64 / 1000.0;
        if elapsed_secs <= 0.0 {
            continue;
        }

        let distance_km = haversine_km(prev.sample.lat, prev.sample.lng, curr.sample.lat, curr.sample.lng);
        let implied_knots = distance_km / elapsed_secs * 3600.0 * KMH_TO_KNOTS;

        if (implied_knots - prev.sample.speed).abs() > thresholds.max_speed_mismatch_knots {
            return Some(Finding::ErraticMovement);
        }
    }

    None
}

// ============================================================================
// AIS MATCH
// ============================================================================

/// `aisMatch == false` and at least one fix inside the recent-activity window
pub fn check_no_ais_match(
    ais_match: Option<bool>,
    history: &[PositionSample],
    now: DateTime<Utc>,
    thresholds: &DetectionThresholds,
) -> Option<Finding> {
    if ais_match != Some(false) {
        return None;
    }

    let Some(cutoff) = thresholds
        .recent_activity()
        .and_then(|window| now.checked_sub_signed(window))
    else {
        log::warn!(
            "Skipping AIS match check, recent_activity_hours {} out of range",
            thresholds.recent_activity_hours
        );
        return None;
    };
    let recently_active = history
        .iter()
        .filter_map(|s| s.timestamp.instant())
        .any(|at| at > cutoff);

    recently_active.then_some(Finding::NoAisMatch)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample(lat: f64, lng: f64, minutes_ago: i64, speed: f64) -> PositionSample {
        PositionSample::new(lat, lng, now() - Duration::minutes(minutes_ago), speed)
    }

    #[test]
    fn test_gap_absent_transmission() {
        let gap = check_signal_gap(None, now(), &DetectionThresholds::default());
        assert_eq!(gap, GapCheck::default());
    }

    #[test]
    fn test_gap_malformed_transmission_is_absent() {
        let ts = Timestamp::parse("??");
        let gap = check_signal_gap(Some(&ts), now(), &DetectionThresholds::default());
        assert!(gap.hours_since.is_none());
        assert!(gap.finding.is_none());
    }

    #[test]
    fn test_gap_hours_reported_below_threshold() {
        let ts = Timestamp::from(now() - Duration::hours(3));
        let gap = check_signal_gap(Some(&ts), now(), &DetectionThresholds::default());
        assert_eq!(gap.hours_since, Some(3.0));
        assert!(gap.finding.is_none());
    }

    #[test]
    fn test_gap_exactly_twelve_hours_not_dark() {
        let ts = Timestamp::from(now() - Duration::hours(12));
        let gap = check_signal_gap(Some(&ts), now(), &DetectionThresholds::default());
        assert!(gap.finding.is_none());
    }

    #[test]
    fn test_window_sorts_newest_first_without_mutating() {
        let history = vec![
            sample(1.0, 1.0, 90, 1.0),
            sample(2.0, 2.0, 10, 2.0),
            sample(3.0, 3.0, 50, 3.0),
            sample(4.0, 4.0, 200, 4.0),
        ];
        let before = history.clone();

        let window = recent_window(&history, 3);
        let lats: Vec<f64> = window.iter().map(|t| t.sample.lat).collect();
        assert_eq!(lats, vec![2.0, 3.0, 1.0]);
        assert_eq!(history, before);
    }

    #[test]
    fn test_window_drops_unusable_entries() {
        let history = vec![
            PositionSample::new(1.0, 1.0, Timestamp::parse("bad"), 1.0),
            sample(f64::NAN, 1.0, 5, 1.0),
            sample(2.0, 2.0, 10, 2.0),
        ];
        let window = recent_window(&history, 3);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].sample.lat, 2.0);
    }

    #[test]
    fn test_zero_speed_requires_exact_zero() {
        let history = vec![sample(10.5, 76.2, 30, 0.0), sample(10.49, 76.2, 60, 0.0)];
        let window = recent_window(&history, 3);
        let t = DetectionThresholds::default();
        assert_eq!(check_zero_speed_movement(0.0, &window, &t), Some(Finding::ZeroSpeedMovement));
        assert_eq!(check_zero_speed_movement(0.1, &window, &t), None);
    }

    #[test]
    fn test_zero_speed_longitude_only() {
        let history = vec![sample(10.5, 76.2, 30, 0.0), sample(10.5, 76.2015, 60, 0.0)];
        let window = recent_window(&history, 3);
        assert!(check_zero_speed_movement(0.0, &window, &DetectionThresholds::default()).is_some());
    }

    #[test]
    fn test_erratic_needs_three_samples() {
        let history = vec![sample(0.0, 0.0, 10, 0.0), sample(0.0, 0.0, 20, 40.0)];
        let window = recent_window(&history, 3);
        assert!(check_erratic_movement(&window, &DetectionThresholds::default()).is_none());
    }

    #[test]
    fn test_erratic_implied_speed_mismatch() {
        // ~11.1 km in 10 minutes is ~36 knots, reported 5
        let history = vec![
            sample(0.1, 0.0, 10, 5.0),
            sample(0.0, 0.0, 20, 5.0),
            sample(0.0, 0.0, 30, 5.0),
        ];
        let window = recent_window(&history, 3);
        assert_eq!(
            check_erratic_movement(&window, &DetectionThresholds::default()),
            Some(Finding::ErraticMovement)
        );
    }

    #[test]
    fn test_erratic_consistent_track_is_clear() {
        // 0.01 deg of latitude (~1.11 km) every 6 minutes is ~6 knots
        let history = vec![
            sample(0.02, 0.0, 0, 6.0),
            sample(0.01, 0.0, 6, 6.0),
            sample(0.00, 0.0, 12, 6.0),
        ];
        let window = recent_window(&history, 3);
        assert!(check_erratic_movement(&window, &DetectionThresholds::default()).is_none());
    }

    #[test]
    fn test_erratic_skips_shared_timestamps() {
        let history = vec![
            sample(1.0, 1.0, 10, 5.0),
            sample(0.0, 0.0, 10, 5.0),
            sample(0.0, 0.0, 10, 5.0),
        ];
        let window = recent_window(&history, 3);
        assert!(check_erratic_movement(&window, &DetectionThresholds::default()).is_none());
    }

    #[test]
    fn test_erratic_compares_newest_fix_speed() {
        // newest pair: 0.01 deg (~1.11 km) in 6 minutes is ~6 knots;
        // the last two fixes share a timestamp so only the newest pair counts
        let newest_matches = vec![
            sample(0.02, 0.0, 0, 6.0),
            sample(0.01, 0.0, 6, 22.0),
            sample(0.01, 0.0, 6, 22.0),
        ];
        let window = recent_window(&newest_matches, 3);
        assert!(check_erratic_movement(&window, &DetectionThresholds::default()).is_none());

        let older_matches = vec![
            sample(0.02, 0.0, 0, 22.0),
            sample(0.01, 0.0, 6, 6.0),
            sample(0.01, 0.0, 6, 6.0),
        ];
        let window = recent_window(&older_matches, 3);
        assert_eq!(
            check_erratic_movement(&window, &DetectionThresholds::default()),
            Some(Finding::ErraticMovement)
        );
    }

    #[test]
    fn test_huge_thresholds_skip_checks() {
        let t = DetectionThresholds {
            signal_gap_hours: i64::MAX / 1000,
            recent_activity_hours: i64::MAX / 1000,
            ..Default::default()
        };
        let history = vec![sample(0.0, 0.0, 60, 0.0)];
        assert_eq!(check_no_ais_match(Some(false), &history, now(), &t), None);

        let ts = Timestamp::from(now() - Duration::hours(40));
        let gap = check_signal_gap(Some(&ts), now(), &t);
        assert_eq!(gap.hours_since, Some(40.0));
        assert!(gap.finding.is_none());
    }

    #[test]
    fn test_no_ais_match_needs_explicit_false() {
        let history = vec![sample(0.0, 0.0, 60, 0.0)];
        let t = DetectionThresholds::default();
        assert_eq!(check_no_ais_match(None, &history, now(), &t), None);
        assert_eq!(check_no_ais_match(Some(true), &history, now(), &t), None);
        assert_eq!(
            check_no_ais_match(Some(false), &history, now(), &t),
            Some(Finding::NoAisMatch)
        );
    }

    #[test]
    fn test_no_ais_match_stale_history() {
        let history = vec![sample(0.0, 0.0, 13 * 60, 0.0)];
        let t = DetectionThresholds::default();
        assert_eq!(check_no_ais_match(Some(false), &history, now(), &t), None);
        assert_eq!(check_no_ais_match(Some(false), &[], now(), &t), None);
    }
}
