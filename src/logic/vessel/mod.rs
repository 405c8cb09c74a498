//! Vessel Module
//!
//! Classifies each vessel as active, suspicious or dark from its AIS
//! transmission history and recent fixes. Pure rule evaluation: one record
//! in, one result out, no state kept between calls.
//!
//! ## Structure
//! - `types`: Core types (VesselRecord, PositionSample, ClassificationResult, etc.)
//! - `rules`: Thresholds and constants
//! - `geo`: Haversine distance
//! - `checks`: The individual evidence rules
//! - `classifier`: Classification and status write-back
//! - `batch`: Vessel-list processing with per-vessel failure isolation
//!
//! ## Usage
//! ```ignore
//! use darkwatch_core::logic::vessel::{classify, VesselStatus};
//!
//! let result = classify(&vessel, chrono::Utc::now())?;
//! if result.is_dark {
//!     println!("{}", result.reasons.join("; "));
//! }
//! ```

pub mod types;
pub mod rules;
pub mod geo;
pub mod checks;
pub mod classifier;
pub mod batch;
pub mod error;


pub use types::{
    ClassificationResult,
    Finding,
    Location,
    PositionSample,
    Timestamp,
    VesselRecord,
    VesselStatus,
};

pub use rules::{
    DetectionThresholds,
    HISTORY_WINDOW,
    POSITION_CHANGE_THRESHOLD_DEG,
    SIGNAL_GAP_HOURS,
};

pub use classifier::{classify, classify_now, classify_with_thresholds, next_status, update_vessel_status};
pub use batch::{process_vessels, process_vessels_parallel, updated_vessels, Verdict, VesselOutcome};
pub use error::ClassifyError;
pub use geo::haversine_km;
