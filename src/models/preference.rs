//! Employee shift preferences.
//!
//! Preferences are desirability scores on a 1..=5 scale for a specific
//! (employee, shift) pair: 1 = strongly avoid, 3 = neutral, 5 = strongly
//! prefer. Pairs without an explicit entry are neutral. Setting a score
//! for an existing pair replaces it; no history is retained.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SchedulingError};

use super::Schedule;

/// The implicit score for pairs with no explicit entry.
pub const NEUTRAL_PREFERENCE: i32 = 3;

/// Per-(employee, shift) preference scores.
///
/// # Example
///
/// ```
/// use rotagen::models::{PreferenceSet, NEUTRAL_PREFERENCE};
///
/// let mut prefs = PreferenceSet::new();
/// prefs.set_preference("E1", "S1", 5).unwrap();
///
/// assert_eq!(prefs.get_preference("E1", "S1"), 5);
/// assert_eq!(prefs.get_preference("E1", "S2"), NEUTRAL_PREFERENCE);
/// assert!(prefs.set_preference("E1", "S1", 6).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceSet {
    /// Employee ID → shift ID → score (1..=5).
    pub scores: HashMap<String, HashMap<String, i32>>,
}

impl PreferenceSet {
    /// Creates an empty preference set (all pairs neutral).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a preference score, replacing any existing entry.
    ///
    /// Fails with [`SchedulingError::InvalidPreferenceScore`] outside 1..=5.
    pub fn set_preference(
        &mut self,
        employee_id: impl Into<String>,
        shift_id: impl Into<String>,
        score: i32,
    ) -> Result<()> {
        if !(1..=5).contains(&score) {
            return Err(SchedulingError::InvalidPreferenceScore { score });
        }
        self.scores
            .entry(employee_id.into())
            .or_default()
            .insert(shift_id.into(), score);
        Ok(())
    }

    /// Gets a preference score, defaulting to neutral for unknown pairs.
    pub fn get_preference(&self, employee_id: &str, shift_id: &str) -> i32 {
        self.scores
            .get(employee_id)
            .and_then(|by_shift| by_shift.get(shift_id))
            .copied()
            .unwrap_or(NEUTRAL_PREFERENCE)
    }

    /// Whether a pair has an explicit entry.
    pub fn contains(&self, employee_id: &str, shift_id: &str) -> bool {
        self.scores
            .get(employee_id)
            .is_some_and(|by_shift| by_shift.contains_key(shift_id))
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.scores.values().map(|m| m.len()).sum()
    }

    /// Whether no explicit entries exist.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Mean normalized preference satisfaction for a schedule.
    ///
    /// Averages `score - 3` over all actual assignments, yielding a value
    /// in `[-2, +2]`: +2 means every assignment is strongly preferred, 0
    /// all-neutral, -2 every assignment is strongly avoided. Returns 0.0
    /// for a schedule with no assignments.
    pub fn satisfaction(&self, schedule: &Schedule) -> f64 {
        let mut total = 0i64;
        let mut count = 0usize;

        for (shift_idx, shift) in schedule.shifts.iter().enumerate() {
            for (emp_idx, employee) in schedule.employees.iter().enumerate() {
                if schedule.is_assigned(shift_idx, emp_idx) {
                    total += (self.get_preference(&employee.id, &shift.id) - NEUTRAL_PREFERENCE)
                        as i64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}
