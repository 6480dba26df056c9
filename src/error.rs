//! Error types for the scheduling engine.
//!
//! Only construction and configuration problems are errors: an infeasible
//! roster (uncoverable shift, exhausted time budget) is reported through
//! coverage gaps and violation counts, never through `Err`.

use thiserror::Error;

/// Main error type for scheduling operations.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Shift constructed with `end <= start`.
    #[error("invalid time range for shift '{shift_id}': end must be after start")]
    InvalidShiftRange {
        /// Offending shift ID.
        shift_id: String,
    },

    /// Preference score outside the 1..=5 scale.
    #[error("preference score {score} is outside the valid range 1..=5")]
    InvalidPreferenceScore {
        /// Offending score.
        score: i32,
    },

    /// Invalid algorithm parameter (zero population, rate outside [0,1], ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input data failed validation (duplicate IDs, non-positive hour caps, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, SchedulingError>;
