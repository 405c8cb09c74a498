//! Vessel Classifier
//!
//! Only classification and status write-back live here.
//! Input: VesselRecord + captured `now`
//! Output: ClassificationResult, and the record's new status

use chrono::{DateTime, Utc};

use super::checks::{
    check_erratic_movement, check_no_ais_match, check_signal_gap, check_zero_speed_movement,
    recent_window,
};
use super::error::ClassifyError;
use super::rules::DetectionThresholds;
use super::types::{ClassificationResult, VesselRecord, VesselStatus};

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify one vessel with the default thresholds.
///
/// Deterministic for a given `now`; the record is not modified.
pub fn classify(vessel: &VesselRecord, now: DateTime<Utc>) -> Result<ClassificationResult, ClassifyError> {
    classify_with_thresholds(vessel, now, &DetectionThresholds::default())
}

/// Classify against the wall clock, read once
pub fn classify_now(vessel: &VesselRecord) -> Result<ClassificationResult, ClassifyError> {
    classify(vessel, Utc::now())
}

/// Classification with custom thresholds
pub fn classify_with_thresholds(
    vessel: &VesselRecord,
    now: DateTime<Utc>,
    thresholds: &DetectionThresholds,
) -> Result<ClassificationResult, ClassifyError> {
    validate(vessel)?;

    let mut findings = Vec::new();

    // 1. AIS silence
    let gap = check_signal_gap(vessel.last_ais_transmission.as_ref(), now, thresholds);
    findings.extend(gap.finding);

    // 2-3. Movement consistency over the newest fixes
    let window = recent_window(&vessel.previous_positions, thresholds.history_window);
    findings.extend(check_zero_speed_movement(vessel.speed, &window, thresholds));
    findings.extend(check_erratic_movement(&window, thresholds));

    // 4. AIS mismatch for a recently seen vessel
    findings.extend(check_no_ais_match(
        vessel.ais_match,
        &vessel.previous_positions,
        now,
        thresholds,
    ));

    let dark = findings.iter().any(|f| f.is_dark_evidence());
    let suspicious = findings.iter().any(|f| !f.is_dark_evidence());
    let reasons: Vec<String> = findings.iter().map(|f| f.reason()).collect();

    for reason in &reasons {
        log::debug!("[{}] {}", vessel.id, reason);
    }

    Ok(ClassificationResult {
        // Suspicious evidence escalates the outward flag as well
        is_dark: dark || suspicious,
        is_suspicious: suspicious,
        reasons,
        hours_since_last_transmission: gap.hours_since,
        findings,
    })
}

fn validate(vessel: &VesselRecord) -> Result<(), ClassifyError> {
    if vessel.id.trim().is_empty() {
        return Err(ClassifyError::MissingId);
    }

    let fields = [
        ("latitude", vessel.location.lat),
        ("longitude", vessel.location.lng),
        ("speed", vessel.speed),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ClassifyError::NonFinite {
                id: vessel.id.clone(),
                field,
            });
        }
    }

    if !(-90.0..=90.0).contains(&vessel.location.lat) {
        return Err(ClassifyError::OutOfRange {
            id: vessel.id.clone(),
            field: "latitude",
            value: vessel.location.lat,
        });
    }
    if !(-180.0..=180.0).contains(&vessel.location.lng) {
        return Err(ClassifyError::OutOfRange {
            id: vessel.id.clone(),
            field: "longitude",
            value: vessel.location.lng,
        });
    }

    Ok(())
}

// ============================================================================
// STATUS TRANSITION
// ============================================================================

/// Next status given the previous one and the latest evaluation.
///
/// dark beats alert; a flagged vessel with no evidence recovers to active;
/// an active vessel with no evidence stays active.
pub fn next_status(previous: VesselStatus, result: &ClassificationResult) -> VesselStatus {
    if result.is_dark {
        VesselStatus::Dark
    } else if result.is_suspicious {
        VesselStatus::Alert
    } else if previous.is_flagged() {
        VesselStatus::Active
    } else {
        previous
    }
}

/// Classify and write `status` and `suspicious` back to the record.
///
/// On error the record is left as it was.
pub fn update_vessel_status(
    vessel: &mut VesselRecord,
    now: DateTime<Utc>,
    thresholds: &DetectionThresholds,
) -> Result<ClassificationResult, ClassifyError> {
    let result = classify_with_thresholds(vessel, now, thresholds)?;

    let previous = vessel.status;
    let status = next_status(previous, &result);
    if status != previous {
        log::info!(
            "Vessel {} ({}) status {} -> {}",
            vessel.id,
            vessel.name,
            previous,
            status
        );
    }

    vessel.status = status;
    vessel.suspicious = Some(result.is_suspicious);
    Ok(result)
}

// ============================================================================
// TESTS
// ============================================================================
