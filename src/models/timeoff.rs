//! Time-off intervals and the per-employee absence calendar.
//!
//! Approved time off is a hard scheduling constraint: the initializer
//! avoids it and the fitness function penalizes any assignment that
//! overlaps it. Employees without entries are always available.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A time interval [start, end).
///
/// Half-open: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this window (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether this window overlaps the half-open range `[start_ms, end_ms)`.
    #[inline]
    pub fn overlaps_range(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_ms < end_ms && start_ms < self.end_ms
    }

    /// Whether two windows overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_range(other.start_ms, other.end_ms)
    }
}

/// Approved time-off intervals keyed by employee ID.
///
/// # Example
///
/// ```
/// use rotagen::models::TimeOffCalendar;
///
/// let mut cal = TimeOffCalendar::new();
/// cal.add("E1", 0, 86_400_000); // first day off
///
/// assert!(cal.is_blocked("E1", 3_600_000, 7_200_000));
/// assert!(!cal.is_blocked("E2", 3_600_000, 7_200_000)); // unknown = available
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeOffCalendar {
    /// Employee ID → approved absence intervals.
    pub entries: HashMap<String, Vec<TimeWindow>>,
}

impl TimeOffCalendar {
    /// Creates an empty calendar (everyone always available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an approved absence interval for an employee.
    pub fn add(&mut self, employee_id: impl Into<String>, start_ms: i64, end_ms: i64) {
        self.entries
            .entry(employee_id.into())
            .or_default()
            .push(TimeWindow::new(start_ms, end_ms));
    }

    /// The absence intervals for an employee (empty slice if none recorded).
    pub fn windows_for(&self, employee_id: &str) -> &[TimeWindow] {
        self.entries
            .get(employee_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the employee has approved time off overlapping `[start, end)`.
    pub fn is_blocked(&self, employee_id: &str, start_ms: i64, end_ms: i64) -> bool {
        self.windows_for(employee_id)
            .iter()
            .any(|w| w.overlaps_range(start_ms, end_ms))
    }

    /// Whether any absences are recorded at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
