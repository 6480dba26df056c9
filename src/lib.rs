//! Workforce shift scheduling engine.
//!
//! Assigns employees to time-bound, role-tagged shift slots with a genetic
//! algorithm: hard constraints (role qualification, approved time off,
//! double-booking, weekly hour caps) are penalized into the fitness
//! function, soft objectives (coverage, workload balance, preference
//! satisfaction) are maximized under a wall-clock time budget.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `Shift`, `Schedule`,
//!   `PreferenceSet`, `TimeOffCalendar`, `TimeWindow`
//! - **`ga`**: Chromosome encoding, genetic operators, fitness evaluation,
//!   and the generation-loop runner
//! - **`scheduler`**: High-level request/response facade and schedule
//!   quality reports
//! - **`validation`**: Input integrity checks (duplicate IDs, hour caps,
//!   empty role sets)
//!
//! # Architecture
//!
//! The engine is a library call, not a service: the caller loads employees,
//! shifts, preferences, and time off from wherever it keeps them, invokes
//! [`scheduler::generate`], and persists the returned assignments. The
//! generation loop is sequential per run; fitness evaluation within a
//! generation is parallelized with rayon.
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Ernst et al. (2004), "Staff Scheduling and Rostering: A Review of
//!   Applications, Methods and Models"

pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;
