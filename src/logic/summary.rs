//! Fleet summary counts for one classification pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::alerts::Alert;
use crate::logic::vessel::{VesselOutcome, VesselStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub last_updated: DateTime<Utc>,
    pub total_vessels: usize,
    pub active_vessels: usize,
    pub dark_vessels: usize,
    pub alert_vessels: usize,
    /// Records that could not be classified this pass
    pub failed_vessels: usize,
    pub alerts: usize,
}

impl FleetSummary {
    pub fn from_outcomes(outcomes: &[VesselOutcome], alerts: &[Alert], now: DateTime<Utc>) -> Self {
        let mut summary = Self {
            last_updated: now,
            total_vessels: outcomes.len(),
            active_vessels: 0,
            dark_vessels: 0,
            alert_vessels: 0,
            failed_vessels: 0,
            alerts: alerts.len(),
        };

        for outcome in outcomes {
            if outcome.is_failed() {
                summary.failed_vessels += 1;
            }
            // Failed records still count under the status they kept
            match outcome.vessel.status {
                VesselStatus::Active => summary.active_vessels += 1,
                VesselStatus::Dark => summary.dark_vessels += 1,
                VesselStatus::Alert => summary.alert_vessels += 1,
            }
        }

        summary
    }
}
