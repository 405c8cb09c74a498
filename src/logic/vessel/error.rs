//! Per-vessel classification errors

use thiserror::Error;

/// Why a record could not be classified.
///
/// Returned per vessel; a batch keeps going past it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("vessel record has no id")]
    MissingId,

    #[error("vessel {id}: {field} is not a finite number")]
    NonFinite { id: String, field: &'static str },

    #[error("vessel {id}: {field} {value} out of range")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },
}

impl ClassifyError {
    /// Short machine-readable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            ClassifyError::MissingId => "missing_id",
            ClassifyError::NonFinite { .. } => "non_finite",
            ClassifyError::OutOfRange { .. } => "out_of_range",
        }
    }
}
