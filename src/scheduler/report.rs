//! Schedule quality report.
//!
//! Post-hoc, read-only inspection of a finished schedule: violation
//! counts, coverage, hours distribution, and (when preferences are
//! supplied) mean preference satisfaction. Used for post-run reporting
//! and in tests.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage | Filled positions / required positions, capped per shift |
//! | Hours stats | Total / mean / min / max / std-dev of per-employee hours |
//! | Violations | Counts per constraint class |
//! | Preference score | Mean of (score - 3) over assignments, in [-2, +2] |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Coverage, PreferenceSet, Schedule, TimeOffCalendar};

/// Violation counts by constraint class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCounts {
    /// Employees assigned more hours than their cap.
    pub max_hours_exceeded: u32,
    /// Assignments where the employee lacks the shift's role.
    pub unqualified_role: u32,
    /// Shifts with fewer assignees than required.
    pub unfilled_shifts: u32,
    /// Pairs of time-overlapping shifts held by one employee.
    pub overlapping_shifts: u32,
    /// Assignments overlapping the employee's approved time off.
    pub time_off_conflicts: u32,
}

impl ViolationCounts {
    /// Total violations across all classes.
    pub fn total(&self) -> u32 {
        self.max_hours_exceeded
            + self.unqualified_role
            + self.unfilled_shifts
            + self.overlapping_shifts
            + self.time_off_conflicts
    }

    /// Whether the schedule is violation-free.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Distribution of assigned hours across employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursStats {
    /// Sum of assigned hours.
    pub total: f64,
    /// Mean hours per employee.
    pub mean: f64,
    /// Fewest hours assigned to any employee.
    pub min: f64,
    /// Most hours assigned to any employee.
    pub max: f64,
    /// Population standard deviation of per-employee hours.
    pub std_dev: f64,
}

/// Quality report for a finished schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Violation counts by class.
    pub violations: ViolationCounts,
    /// Coverage metrics.
    pub coverage: Coverage,
    /// Hours distribution.
    pub hours: HoursStats,
    /// Per-employee assigned hours.
    pub employee_hours: HashMap<String, f64>,
    /// Mean preference satisfaction in `[-2, +2]`, when preferences were supplied.
    pub preference_score: Option<f64>,
}

impl ScheduleReport {
    /// Computes the report. Never mutates the schedule.
    ///
    /// Time-off conflicts are only counted when a calendar is supplied;
    /// preference satisfaction only when preferences are.
    pub fn calculate(
        schedule: &Schedule,
        preferences: Option<&PreferenceSet>,
        time_off: Option<&TimeOffCalendar>,
    ) -> Self {
        let employee_hours = schedule.employee_hours();
        let mut violations = ViolationCounts::default();

        for employee in &schedule.employees {
            if employee_hours.get(&employee.id).copied().unwrap_or(0.0) > employee.max_hours {
                violations.max_hours_exceeded += 1;
            }
        }

        for (shift_idx, shift) in schedule.shifts.iter().enumerate() {
            let mut assigned = 0u32;
            for (emp_idx, employee) in schedule.employees.iter().enumerate() {
                if !schedule.is_assigned(shift_idx, emp_idx) {
                    continue;
                }
                assigned += 1;
                if !employee.can_perform(&shift.role_id) {
                    violations.unqualified_role += 1;
                }
                if let Some(calendar) = time_off {
                    if calendar.is_blocked(&employee.id, shift.start_ms, shift.end_ms) {
                        violations.time_off_conflicts += 1;
                    }
                }
            }
            if assigned < shift.required_staff {
                violations.unfilled_shifts += 1;
            }
        }

        for employee in &schedule.employees {
            let held = schedule.assignments_for_employee(&employee.id);
            for (i, a) in held.iter().enumerate() {
                for b in &held[i + 1..] {
                    if a.overlaps_shift(b) {
                        violations.overlapping_shifts += 1;
                    }
                }
            }
        }

        let hours = Self::hours_stats(&employee_hours);
        let preference_score = preferences.map(|prefs| prefs.satisfaction(schedule));

        Self {
            violations,
            coverage: schedule.coverage(),
            hours,
            employee_hours,
            preference_score,
        }
    }

    fn hours_stats(employee_hours: &HashMap<String, f64>) -> HoursStats {
        if employee_hours.is_empty() {
            return HoursStats::default();
        }
        let values: Vec<f64> = employee_hours.values().copied().collect();
        let total: f64 = values.iter().sum();
        let mean = total / values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let variance =
            values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;

        HoursStats {
            total,
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Shift};

    const HOUR: i64 = 3_600_000;

    fn base_schedule() -> Schedule {
        let employees = vec![
            Employee::new("E1").with_max_hours(40.0).with_role("r1"),
            Employee::new("E2").with_max_hours(40.0).with_role("r1"),
        ];
        let shifts = vec![
            Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap(),
            Shift::new("S2", 8 * HOUR, 16 * HOUR, "r1", 1).unwrap(),
        ];
        Schedule::new(employees, shifts)
    }

    #[test]
    fn test_clean_schedule() {
        let mut schedule = base_schedule();
        schedule.assign(0, 0);
        schedule.assign(1, 1);

        let report = ScheduleReport::calculate(&schedule, None, None);
        assert!(report.violations.is_clean());
        assert_eq!(report.coverage.total_assigned, 2);
        assert!((report.coverage.percent - 100.0).abs() < 1e-10);
        assert!((report.hours.total - 16.0).abs() < 1e-10);
        assert!((report.hours.mean - 8.0).abs() < 1e-10);
        assert!((report.hours.std_dev - 0.0).abs() < 1e-10);
        assert!(report.preference_score.is_none());
    }

    #[test]
    fn test_unfilled_shift_counted() {
        let mut schedule = base_schedule();
        schedule.assign(0, 0); // S2 left empty

        let report = ScheduleReport::calculate(&schedule, None, None);
        assert_eq!(report.violations.unfilled_shifts, 1);
        assert!((report.coverage.percent - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_unqualified_role_counted() {
        let employees = vec![Employee::new("E1").with_role("other")];
        let shifts = vec![Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap()];
        let mut schedule = Schedule::new(employees, shifts);
        schedule.assign(0, 0);

        let report = ScheduleReport::calculate(&schedule, None, None);
        assert_eq!(report.violations.unqualified_role, 1);
    }

    #[test]
    fn test_overlap_counted() {
        let employees = vec![Employee::new("E1").with_role("r1")];
        let shifts = vec![
            Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap(),
            Shift::new("S2", 4 * HOUR, 12 * HOUR, "r1", 1).unwrap(),
        ];
        let mut schedule = Schedule::new(employees, shifts);
        schedule.assign(0, 0);
        schedule.assign(1, 0);

        let report = ScheduleReport::calculate(&schedule, None, None);
        assert_eq!(report.violations.overlapping_shifts, 1);
    }

    #[test]
    fn test_max_hours_counted() {
        let employees = vec![Employee::new("E1").with_max_hours(6.0).with_role("r1")];
        let shifts = vec![Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap()];
        let mut schedule = Schedule::new(employees, shifts);
        schedule.assign(0, 0);

        let report = ScheduleReport::calculate(&schedule, None, None);
        assert_eq!(report.violations.max_hours_exceeded, 1);
    }

    #[test]
    fn test_time_off_conflict_counted() {
        let mut schedule = base_schedule();
        schedule.assign(0, 0);

        let mut calendar = TimeOffCalendar::new();
        calendar.add("E1", 0, 24 * HOUR);

        let without = ScheduleReport::calculate(&schedule, None, None);
        assert_eq!(without.violations.time_off_conflicts, 0);

        let with = ScheduleReport::calculate(&schedule, None, Some(&calendar));
        assert_eq!(with.violations.time_off_conflicts, 1);
    }

    #[test]
    fn test_preference_score_present() {
        let mut schedule = base_schedule();
        schedule.assign(0, 0);

        let mut prefs = PreferenceSet::new();
        prefs.set_preference("E1", "S1", 5).unwrap();

        let report = ScheduleReport::calculate(&schedule, Some(&prefs), None);
        assert!((report.preference_score.unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_schedule_report() {
        let schedule = Schedule::new(vec![], vec![]);
        let report = ScheduleReport::calculate(&schedule, None, None);
        assert!(report.violations.is_clean());
        assert_eq!(report.hours, HoursStats::default());
        assert!((report.coverage.percent - 100.0).abs() < 1e-10);
    }
}
