//! Batch processing
//!
//! Applies the classifier vessel-by-vessel. Output order matches input
//! order, and a failure on one vessel is kept on that vessel's outcome.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use super::classifier::update_vessel_status;
use super::error::ClassifyError;
use super::rules::DetectionThresholds;
use super::types::{ClassificationResult, VesselRecord, VesselStatus};

/// One vessel after a classification pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselOutcome {
    /// Status before this pass
    pub previous_status: VesselStatus,
    /// Updated record (unchanged when classification failed)
    pub vessel: VesselRecord,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Classification result or the per-vessel error marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    Classified { result: ClassificationResult },
    Failed { code: &'static str, error: String },
}

impl VesselOutcome {
    fn new(mut vessel: VesselRecord, now: DateTime<Utc>, thresholds: &DetectionThresholds) -> Self {
        let previous_status = vessel.status;
        let verdict = match update_vessel_status(&mut vessel, now, thresholds) {
            Ok(result) => Verdict::Classified { result },
            Err(e) => {
                log::warn!("Skipping vessel classification: {}", e);
                Verdict::from_error(&e)
            }
        };

        Self {
            previous_status,
            vessel,
            verdict,
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.verdict {
            Verdict::Classified { result } => Some(result),
            Verdict::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.verdict, Verdict::Failed { .. })
    }

    pub fn status_changed(&self) -> bool {
        self.previous_status != self.vessel.status
    }
}

impl Verdict {
    fn from_error(err: &ClassifyError) -> Self {
        Verdict::Failed {
            code: err.code(),
            error: err.to_string(),
        }
    }
}

/// Classify every vessel in order, one after another
pub fn process_vessels(
    vessels: Vec<VesselRecord>,
    now: DateTime<Utc>,
    thresholds: &DetectionThresholds,
) -> Vec<VesselOutcome> {
    vessels
        .into_iter()
        .map(|v| VesselOutcome::new(v, now, thresholds))
        .collect()
}

/// Same as `process_vessels`, spread over the rayon pool.
///
/// Every vessel sees the same `now`, so results match the sequential run.
pub fn process_vessels_parallel(
    vessels: Vec<VesselRecord>,
    now: DateTime<Utc>,
    thresholds: &DetectionThresholds,
) -> Vec<VesselOutcome> {
    vessels
        .into_par_iter()
        .map(|v| VesselOutcome::new(v, now, thresholds))
        .collect()
}

/// Records only, in input order
pub fn updated_vessels(outcomes: Vec<VesselOutcome>) -> Vec<VesselRecord> {
    outcomes.into_iter().map(|o| o.vessel).collect()
}
