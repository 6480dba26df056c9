//! High-level scheduling facade and quality reports.
//!
//! Wraps the GA engine behind a single call: bundle the inputs into a
//! [`RosterRequest`], call [`generate`], persist the returned schedule.
//! The surrounding system owns storage — this module neither reads nor
//! writes anything but its arguments.
//!
//! # Example
//!
//! ```
//! use rotagen::ga::GaConfig;
//! use rotagen::models::{Employee, Shift};
//! use rotagen::scheduler::{generate, RosterRequest};
//!
//! let employees = vec![Employee::new("E1").with_role("cashier")];
//! let shifts = vec![Shift::new("S1", 0, 28_800_000, "cashier", 1).unwrap()];
//!
//! let request = RosterRequest::new(employees, shifts)
//!     .with_config(GaConfig::default().with_max_generations(5).with_seed(1));
//! let outcome = generate(&request).unwrap();
//! assert_eq!(outcome.schedule.assigned_employees("S1").len(), 1);
//! ```

mod report;

pub use report::{HoursStats, ScheduleReport, ViolationCounts};

use tracing::info;

use crate::error::{Result, SchedulingError};
use crate::ga::{GaConfig, GaRunner, RosterProblem, ScheduleOutcome};
use crate::models::{Employee, PreferenceSet, Shift, TimeOffCalendar};
use crate::validation::validate_input;

/// Input container for one optimization run.
#[derive(Debug, Clone)]
pub struct RosterRequest {
    /// Workforce to roster.
    pub employees: Vec<Employee>,
    /// Shifts to staff.
    pub shifts: Vec<Shift>,
    /// Employee shift preferences.
    pub preferences: PreferenceSet,
    /// Approved time off.
    pub time_off: TimeOffCalendar,
    /// Algorithm parameters.
    pub config: GaConfig,
}

impl RosterRequest {
    /// Creates a request with default parameters and no preferences or
    /// time off.
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self {
            employees,
            shifts,
            preferences: PreferenceSet::new(),
            time_off: TimeOffCalendar::new(),
            config: GaConfig::default(),
        }
    }

    /// Sets employee preferences.
    pub fn with_preferences(mut self, preferences: PreferenceSet) -> Self {
        self.preferences = preferences;
        self
    }

    /// Sets the approved time-off calendar.
    pub fn with_time_off(mut self, time_off: TimeOffCalendar) -> Self {
        self.time_off = time_off;
        self
    }

    /// Sets the algorithm parameters.
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }
}

/// Generates a schedule for the request.
///
/// Validates the inputs and parameters up front (fail fast, before any
/// population is allocated), then runs the genetic algorithm to the
/// generation cap or the wall-clock limit. Shifts nobody can legally fill
/// come back as coverage gaps in the outcome, not as errors.
pub fn generate(request: &RosterRequest) -> Result<ScheduleOutcome> {
    if let Err(errors) = validate_input(&request.employees, &request.shifts) {
        let summary = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SchedulingError::InvalidInput(summary));
    }

    info!(
        employees = request.employees.len(),
        shifts = request.shifts.len(),
        "generating schedule"
    );

    let problem = RosterProblem::new(request.employees.clone(), request.shifts.clone())
        .with_preferences(request.preferences.clone())
        .with_time_off(request.time_off.clone());

    GaRunner::run(&problem, &request.config)
}
