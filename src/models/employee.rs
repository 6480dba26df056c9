//! Employee model.
//!
//! Employees are the resources being rostered: each carries an hour cap
//! for the scheduling horizon and the set of role IDs it is qualified to
//! fill. Supplied whole by the caller per optimization run.

use serde::{Deserialize, Serialize};

/// A worker that can be assigned to shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Maximum assignable hours over the scheduling horizon.
    pub max_hours: f64,
    /// Role IDs this employee is qualified for.
    pub roles: Vec<String>,
}

impl Employee {
    /// Creates a new employee with no roles and a 40-hour cap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_hours: 40.0,
            roles: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hour cap.
    pub fn with_max_hours(mut self, max_hours: f64) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Adds a qualified role.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.roles.push(role_id.into());
        self
    }

    /// Replaces the full role set.
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Whether this employee is qualified for a role.
    pub fn can_perform(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_builder() {
        let e = Employee::new("E1")
            .with_name("Alice")
            .with_max_hours(32.0)
            .with_role("nurse")
            .with_role("triage");

        assert_eq!(e.id, "E1");
        assert_eq!(e.name, "Alice");
        assert!((e.max_hours - 32.0).abs() < 1e-10);
        assert!(e.can_perform("nurse"));
        assert!(e.can_perform("triage"));
        assert!(!e.can_perform("surgeon"));
    }

    #[test]
    fn test_employee_defaults() {
        let e = Employee::new("E1");
        assert!((e.max_hours - 40.0).abs() < 1e-10);
        assert!(e.roles.is_empty());
        assert!(!e.can_perform("any"));
    }

    #[test]
    fn test_with_roles_replaces() {
        let e = Employee::new("E1")
            .with_role("old")
            .with_roles(vec!["a".into(), "b".into()]);
        assert!(!e.can_perform("old"));
        assert!(e.can_perform("a"));
        assert!(e.can_perform("b"));
    }
}
