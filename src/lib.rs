//! Darkwatch Core
//!
//! Rule-based vessel surveillance: classifies each vessel as active,
//! suspicious (alert) or dark from its AIS transmission history and recent
//! position fixes.

pub mod constants;
pub mod logic;

pub use logic::vessel::{
    classify, process_vessels, update_vessel_status, ClassificationResult, ClassifyError,
    VesselRecord, VesselStatus,
};
