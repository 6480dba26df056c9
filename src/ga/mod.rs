//! GA-based roster optimization.
//!
//! # Encoding
//!
//! A candidate roster is a shift × employee binary matrix flattened
//! shift-major into a boolean gene vector: gene `(s, e)` set means
//! employee `e` works shift `s`. The matrix form keeps crossover,
//! mutation, and coverage computation uniform — there is no separate
//! position-list bookkeeping.
//!
//! # Submodules
//!
//! - [`problem`]: Problem definition — inputs, eligibility, fitness,
//!   candidate seeding, decoding
//! - [`operators`]: Tournament selection, single-point crossover,
//!   per-shift reassignment mutation
//! - [`engine`]: Generation-loop runner with elitism, wall-clock time
//!   limit, and per-generation statistics
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

mod chromosome;
mod engine;
pub mod operators;
mod problem;

pub use chromosome::{RosterChromosome, UNEVALUATED_FITNESS};
pub use engine::{GaConfig, GaRunner, GenerationStats, ScheduleOutcome};
pub use operators::{reassign_mutation, single_point_crossover, tournament_selection};
pub use problem::{FitnessWeights, RosterProblem};
