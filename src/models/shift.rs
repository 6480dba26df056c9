//! Shift model.
//!
//! A shift is a time-bounded staffing requirement: a half-open interval
//! `[start, end)`, a role, and how many qualified employees it needs.
//! The time-range invariant (`end > start`) and the headcount invariant
//! (`required_staff >= 1`) are enforced at construction and nowhere else.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// A time-bounded, role-tagged staffing requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier (within a run).
    pub id: String,
    /// Start instant (ms since the scheduling epoch, inclusive).
    pub start_ms: i64,
    /// End instant (ms, exclusive).
    pub end_ms: i64,
    /// Role the assigned employees must hold.
    pub role_id: String,
    /// Number of employees this shift needs.
    pub required_staff: u32,
}

impl Shift {
    /// Creates a new shift.
    ///
    /// Fails with [`SchedulingError::InvalidShiftRange`] if `end_ms <= start_ms`
    /// and with [`SchedulingError::InvalidParameter`] if `required_staff` is zero.
    pub fn new(
        id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
        role_id: impl Into<String>,
        required_staff: u32,
    ) -> Result<Self> {
        let id = id.into();
        if end_ms <= start_ms {
            return Err(SchedulingError::InvalidShiftRange { shift_id: id });
        }
        if required_staff == 0 {
            return Err(SchedulingError::InvalidParameter(format!(
                "shift '{id}' requires at least one staff position"
            )));
        }
        Ok(Self {
            id,
            start_ms,
            end_ms,
            role_id: role_id.into(),
            required_staff,
        })
    }

    /// Shift length in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        (self.end_ms - self.start_ms) as f64 / MS_PER_HOUR as f64
    }

    /// Day the shift starts on, counted from the epoch day.
    #[inline]
    pub fn day_index(&self) -> i64 {
        self.start_ms.div_euclid(MS_PER_DAY)
    }

    /// Day of week in 0..=6, where day 0 is the epoch day.
    #[inline]
    pub fn day_of_week(&self) -> i64 {
        self.day_index().rem_euclid(7)
    }

    /// Whether this shift overlaps the half-open range `[start_ms, end_ms)`.
    #[inline]
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_ms < end_ms && start_ms < self.end_ms
    }

    /// Whether two shifts overlap in time.
    #[inline]
    pub fn overlaps_shift(&self, other: &Shift) -> bool {
        self.overlaps(other.start_ms, other.end_ms)
    }
}
