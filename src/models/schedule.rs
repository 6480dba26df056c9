//! Schedule (solution) model.
//!
//! A schedule is a binary assignment relation over shifts × employees,
//! stored as a shift-major boolean matrix. Over-assignment past a shift's
//! required headcount is representable — the evaluator penalizes it, the
//! representation does not forbid it. Each schedule is an independent
//! value; the optimizer copies, never shares.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Employee, Shift};

/// A complete shift assignment (candidate or result).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// The employees this schedule assigns.
    pub employees: Vec<Employee>,
    /// The shifts being staffed.
    pub shifts: Vec<Shift>,
    /// Assignment matrix: `assignments[shift][employee]`.
    pub assignments: Vec<Vec<bool>>,
}

/// Coverage metrics for a schedule.
///
/// `total_assigned` caps each shift's contribution at its required
/// headcount, so over-assignment never inflates coverage past 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Sum of required staff positions across all shifts.
    pub total_required: u32,
    /// Filled positions, capped per shift at its requirement.
    pub total_assigned: u32,
    /// `total_assigned / total_required` as a percentage; 100 when nothing
    /// is required.
    pub percent: f64,
}

impl Schedule {
    /// Creates an empty schedule over the given employees and shifts.
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        let assignments = vec![vec![false; employees.len()]; shifts.len()];
        Self {
            employees,
            shifts,
            assignments,
        }
    }

    /// Assigns an employee to a shift (by index).
    pub fn assign(&mut self, shift_idx: usize, employee_idx: usize) {
        self.assignments[shift_idx][employee_idx] = true;
    }

    /// Removes an assignment (by index).
    pub fn unassign(&mut self, shift_idx: usize, employee_idx: usize) {
        self.assignments[shift_idx][employee_idx] = false;
    }

    /// Whether an employee is assigned to a shift (by index).
    #[inline]
    pub fn is_assigned(&self, shift_idx: usize, employee_idx: usize) -> bool {
        self.assignments[shift_idx][employee_idx]
    }

    /// Index of an employee by ID.
    pub fn employee_index(&self, employee_id: &str) -> Option<usize> {
        self.employees.iter().position(|e| e.id == employee_id)
    }

    /// Index of a shift by ID.
    pub fn shift_index(&self, shift_id: &str) -> Option<usize> {
        self.shifts.iter().position(|s| s.id == shift_id)
    }

    /// Number of employees assigned to a shift (by index).
    pub fn assigned_count(&self, shift_idx: usize) -> u32 {
        self.assignments[shift_idx].iter().filter(|&&a| a).count() as u32
    }

    /// Total assigned hours per employee ID.
    pub fn employee_hours(&self) -> HashMap<String, f64> {
        let mut totals = vec![0.0f64; self.employees.len()];

        for (shift_idx, shift) in self.shifts.iter().enumerate() {
            let duration = shift.duration_hours();
            for (emp_idx, total) in totals.iter_mut().enumerate() {
                if self.assignments[shift_idx][emp_idx] {
                    *total += duration;
                }
            }
        }

        self.employees
            .iter()
            .zip(totals)
            .map(|(e, total)| (e.id.clone(), total))
            .collect()
    }

    /// All shifts assigned to an employee.
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<&Shift> {
        let Some(emp_idx) = self.employee_index(employee_id) else {
            return Vec::new();
        };
        self.shifts
            .iter()
            .enumerate()
            .filter(|(shift_idx, _)| self.assignments[*shift_idx][emp_idx])
            .map(|(_, shift)| shift)
            .collect()
    }

    /// All employees assigned to a shift.
    pub fn assigned_employees(&self, shift_id: &str) -> Vec<&Employee> {
        let Some(shift_idx) = self.shift_index(shift_id) else {
            return Vec::new();
        };
        self.employees
            .iter()
            .enumerate()
            .filter(|(emp_idx, _)| self.assignments[shift_idx][*emp_idx])
            .map(|(_, employee)| employee)
            .collect()
    }

    /// Coverage metrics, capping each shift at its required headcount.
    pub fn coverage(&self) -> Coverage {
        let total_required: u32 = self.shifts.iter().map(|s| s.required_staff).sum();
        let total_assigned: u32 = self
            .shifts
            .iter()
            .enumerate()
            .map(|(shift_idx, shift)| self.assigned_count(shift_idx).min(shift.required_staff))
            .sum();
        let percent = if total_required == 0 {
            100.0
        } else {
            total_assigned as f64 / total_required as f64 * 100.0
        };
        Coverage {
            total_required,
            total_assigned,
            percent,
        }
    }

    /// Total number of assignments in the relation.
    pub fn assignment_count(&self) -> usize {
        self.assignments
            .iter()
            .map(|row| row.iter().filter(|&&a| a).count())
            .sum()
    }
}
