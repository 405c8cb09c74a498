//! Alerts
//!
//! Turns flagged classifications into alert records for the presentation
//! layer. Dark evidence wins over movement evidence when picking the kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::vessel::{ClassificationResult, Location, VesselOutcome, VesselRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    DarkVessel,
    SuspiciousActivity,
}

impl AlertKind {
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::DarkVessel => "Dark Vessel",
            AlertKind::SuspiciousActivity => "Suspicious Movement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub description: String,
    pub vessel_id: String,
    pub vessel: String,
}

/// Alert for a flagged vessel, `None` when nothing fired
pub fn alert_for(vessel: &VesselRecord, result: &ClassificationResult, now: DateTime<Utc>) -> Option<Alert> {
    if !result.is_dark && !result.is_suspicious {
        return None;
    }

    let (kind, severity) = if result.has_dark_evidence() {
        (AlertKind::DarkVessel, Severity::High)
    } else {
        (AlertKind::SuspiciousActivity, Severity::Medium)
    };

    Some(Alert {
        id: Uuid::new_v4(),
        kind,
        severity,
        timestamp: now,
        location: vessel.location,
        description: result.reasons.join("; "),
        vessel_id: vessel.id.clone(),
        vessel: if vessel.name.is_empty() {
            vessel.id.clone()
        } else {
            vessel.name.clone()
        },
    })
}

/// Alerts for a batch, highest severity first, input order within a severity
pub fn collect_alerts(outcomes: &[VesselOutcome], now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = outcomes
        .iter()
        .filter_map(|o| o.result().and_then(|r| alert_for(&o.vessel, r, now)))
        .collect();
    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
    alerts
}
