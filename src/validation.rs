//! Input validation for rostering problems.
//!
//! Checks structural integrity of employees and shifts before
//! optimization. Detects:
//! - Duplicate IDs
//! - Non-positive hour caps
//! - Employees with no qualified roles
//!
//! A shift whose role no employee holds is NOT a validation error: that
//! is infeasibility, reported after the run as a coverage gap.

use std::collections::HashSet;

use crate::models::{Employee, Shift};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An employee's hour cap is zero or negative.
    NonPositiveHours,
    /// An employee is qualified for no role at all.
    EmptyRoleSet,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a rostering problem.
///
/// Checks:
/// 1. No duplicate employee IDs
/// 2. No duplicate shift IDs
/// 3. Every employee has a positive hour cap
/// 4. Every employee holds at least one role
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(employees: &[Employee], shifts: &[Shift]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut employee_ids = HashSet::new();
    for employee in employees {
        if !employee_ids.insert(employee.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", employee.id),
            ));
        }
        if employee.max_hours <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveHours,
                format!(
                    "Employee '{}' has non-positive max_hours {}",
                    employee.id, employee.max_hours
                ),
            ));
        }
        if employee.roles.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRoleSet,
                format!("Employee '{}' is qualified for no role", employee.id),
            ));
        }
    }

    let mut shift_ids = HashSet::new();
    for shift in shifts {
        if !shift_ids.insert(shift.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", shift.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;

    fn valid_employees() -> Vec<Employee> {
        vec![
            Employee::new("E1").with_max_hours(40.0).with_role("r1"),
            Employee::new("E2").with_max_hours(32.0).with_role("r2"),
        ]
    }

    fn valid_shifts() -> Vec<Shift> {
        vec![
            Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap(),
            Shift::new("S2", 8 * HOUR, 16 * HOUR, "r2", 1).unwrap(),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&valid_employees(), &valid_shifts()).is_ok());
    }

    #[test]
    fn test_duplicate_employee_id() {
        let mut employees = valid_employees();
        employees.push(Employee::new("E1").with_role("r1"));

        let errors = validate_input(&employees, &valid_shifts()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("E1"));
    }

    #[test]
    fn test_duplicate_shift_id() {
        let mut shifts = valid_shifts();
        shifts.push(Shift::new("S1", 16 * HOUR, 24 * HOUR, "r1", 1).unwrap());

        let errors = validate_input(&valid_employees(), &shifts).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_non_positive_hours() {
        let employees = vec![Employee::new("E1").with_max_hours(0.0).with_role("r1")];
        let errors = validate_input(&employees, &valid_shifts()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveHours);
    }

    #[test]
    fn test_empty_role_set() {
        let employees = vec![Employee::new("E1").with_max_hours(40.0)];
        let errors = validate_input(&employees, &valid_shifts()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyRoleSet);
    }

    #[test]
    fn test_all_errors_collected() {
        let employees = vec![
            Employee::new("E1").with_max_hours(-1.0), // bad hours + no roles
            Employee::new("E1").with_max_hours(40.0).with_role("r1"), // dup id
        ];
        let errors = validate_input(&employees, &valid_shifts()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_uncoverable_shift_is_not_an_error() {
        // No employee holds "r9" — infeasible, but structurally fine.
        let shifts = vec![Shift::new("S1", 0, 8 * HOUR, "r9", 3).unwrap()];
        assert!(validate_input(&valid_employees(), &shifts).is_ok());
    }

    #[test]
    fn test_empty_inputs_are_valid() {
        assert!(validate_input(&[], &[]).is_ok());
    }
}
