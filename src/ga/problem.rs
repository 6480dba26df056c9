//! Roster GA problem definition.
//!
//! Bridges the domain models (Employee, Shift, PreferenceSet,
//! TimeOffCalendar) to the genetic search: seeds candidates biased toward
//! feasibility, scores them with the weighted multi-term fitness, and
//! decodes the winner back into a [`Schedule`].
//!
//! # Fitness
//!
//! `coverage + balance + preference - penalty`, floored at zero. The
//! constraint penalty weight sits an order of magnitude above the sum of
//! the positive weights, so any violation strictly dominates whatever it
//! would otherwise gain — a soft rejection without an explicit repair step.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::models::{Employee, PreferenceSet, Schedule, Shift, TimeOffCalendar, NEUTRAL_PREFERENCE};

use super::chromosome::RosterChromosome;

/// Fraction of seeded candidates built with the greedy heuristic.
const GREEDY_SEED_FRACTION: f64 = 0.25;

/// Weights for the fitness terms.
///
/// `constraint` is charged per violation (and per excess hour for the
/// hour-cap term); keep it well above the sum of the other three so that
/// violations dominate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessWeights {
    /// Weight of the coverage ratio term.
    pub coverage: f64,
    /// Weight of the workload-balance term.
    pub balance: f64,
    /// Weight of the preference-satisfaction term.
    pub preference: f64,
    /// Penalty charged per constraint violation.
    pub constraint: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            coverage: 1000.0,
            balance: 200.0,
            preference: 50.0,
            constraint: 10_000.0,
        }
    }
}

impl FitnessWeights {
    /// Sets the coverage weight.
    pub fn with_coverage(mut self, weight: f64) -> Self {
        self.coverage = weight;
        self
    }

    /// Sets the balance weight.
    pub fn with_balance(mut self, weight: f64) -> Self {
        self.balance = weight;
        self
    }

    /// Sets the preference weight.
    pub fn with_preference(mut self, weight: f64) -> Self {
        self.preference = weight;
        self
    }

    /// Sets the per-violation penalty weight.
    pub fn with_constraint(mut self, weight: f64) -> Self {
        self.constraint = weight;
        self
    }
}

/// GA problem definition for roster optimization.
///
/// # Example
/// ```no_run
/// use rotagen::ga::{GaConfig, GaRunner, RosterProblem};
/// use rotagen::models::{Employee, Shift};
///
/// let employees = vec![Employee::new("E1").with_role("cashier")];
/// let shifts = vec![Shift::new("S1", 0, 28_800_000, "cashier", 1).unwrap()];
/// let problem = RosterProblem::new(employees, shifts);
/// let config = GaConfig::default().with_seed(42);
/// let outcome = GaRunner::run(&problem, &config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RosterProblem {
    /// Workforce being rostered.
    pub employees: Vec<Employee>,
    /// Shifts to staff.
    pub shifts: Vec<Shift>,
    /// Employee shift preferences (neutral when empty).
    pub preferences: PreferenceSet,
    /// Approved time off (empty = everyone always available).
    pub time_off: TimeOffCalendar,
    /// Fitness term weights.
    pub weights: FitnessWeights,

    /// Per-shift duration in hours.
    durations: Vec<f64>,
    /// Per-shift role-qualified employee indices.
    qualified: Vec<Vec<usize>>,
    /// Sum of required staff across all shifts.
    total_required: u32,
}

impl RosterProblem {
    /// Creates a problem from the domain inputs.
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        let durations = shifts.iter().map(|s| s.duration_hours()).collect();
        let qualified = shifts
            .iter()
            .map(|shift| {
                employees
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.can_perform(&shift.role_id))
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .collect();
        let total_required = shifts.iter().map(|s| s.required_staff).sum();

        Self {
            employees,
            shifts,
            preferences: PreferenceSet::new(),
            time_off: TimeOffCalendar::new(),
            weights: FitnessWeights::default(),
            durations,
            qualified,
            total_required,
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

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    // ======================== Seeding ========================

    /// Creates one candidate, biased toward feasibility.
    ///
    /// Most candidates assign a random sample of eligible employees per
    /// shift; a fraction is seeded greedily (most hour-constrained
    /// eligible employee first) to lift early-generation fitness without
    /// collapsing diversity.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> RosterChromosome {
        if rng.random_bool(GREEDY_SEED_FRACTION) {
            self.greedy_candidate()
        } else {
            self.random_candidate(rng)
        }
    }

    fn random_candidate<R: Rng>(&self, rng: &mut R) -> RosterChromosome {
        let mut chromosome = RosterChromosome::empty(self.shifts.len(), self.employees.len());
        let mut hours = vec![0.0f64; self.employees.len()];
        let mut held: Vec<Vec<usize>> = vec![Vec::new(); self.employees.len()];

        for shift_idx in 0..self.shifts.len() {
            let eligible = self.seed_eligible(shift_idx, &hours, &held);
            let take = (self.shifts[shift_idx].required_staff as usize).min(eligible.len());
            let picked: Vec<usize> = eligible
                .choose_multiple(rng, take)
                .copied()
                .collect();
            for emp_idx in picked {
                chromosome.set(shift_idx, emp_idx, true);
                hours[emp_idx] += self.durations[shift_idx];
                held[emp_idx].push(shift_idx);
            }
        }

        chromosome
    }

    fn greedy_candidate(&self) -> RosterChromosome {
        let mut chromosome = RosterChromosome::empty(self.shifts.len(), self.employees.len());
        let mut hours = vec![0.0f64; self.employees.len()];
        let mut held: Vec<Vec<usize>> = vec![Vec::new(); self.employees.len()];

        for shift_idx in 0..self.shifts.len() {
            let mut eligible = self.seed_eligible(shift_idx, &hours, &held);
            // Least remaining budget first: flexible employees stay free
            // for later shifts.
            eligible.sort_by(|&a, &b| {
                let rem_a = self.employees[a].max_hours - hours[a];
                let rem_b = self.employees[b].max_hours - hours[b];
                rem_a
                    .partial_cmp(&rem_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let take = (self.shifts[shift_idx].required_staff as usize).min(eligible.len());
            for &emp_idx in eligible.iter().take(take) {
                chromosome.set(shift_idx, emp_idx, true);
                hours[emp_idx] += self.durations[shift_idx];
                held[emp_idx].push(shift_idx);
            }
        }

        chromosome
    }

    /// Eligible employees for a shift while seeding a candidate:
    /// role-qualified, not on approved time off, no overlap with shifts
    /// already held in this candidate, and enough remaining hours budget.
    fn seed_eligible(&self, shift_idx: usize, hours: &[f64], held: &[Vec<usize>]) -> Vec<usize> {
        let shift = &self.shifts[shift_idx];
        let duration = self.durations[shift_idx];

        self.qualified[shift_idx]
            .iter()
            .copied()
            .filter(|&emp_idx| {
                let employee = &self.employees[emp_idx];
                if hours[emp_idx] + duration > employee.max_hours {
                    return false;
                }
                if self
                    .time_off
                    .is_blocked(&employee.id, shift.start_ms, shift.end_ms)
                {
                    return false;
                }
                !held[emp_idx]
                    .iter()
                    .any(|&other| self.shifts[other].overlaps_shift(shift))
            })
            .collect()
    }

    /// Eligible employees for a shift at mutation time: role-qualified
    /// with enough remaining hours budget. Time-off and double-booking
    /// conflicts a mutation introduces are left to the penalty.
    pub(crate) fn mutation_eligible(&self, shift_idx: usize, hours: &[f64]) -> Vec<usize> {
        let duration = self.durations[shift_idx];
        self.qualified[shift_idx]
            .iter()
            .copied()
            .filter(|&emp_idx| hours[emp_idx] + duration <= self.employees[emp_idx].max_hours)
            .collect()
    }

    // ======================== Evaluation ========================

    /// Per-employee assigned hours for a candidate.
    pub fn employee_hours(&self, chromosome: &RosterChromosome) -> Vec<f64> {
        let mut hours = vec![0.0f64; self.employees.len()];
        for shift_idx in 0..self.shifts.len() {
            let duration = self.durations[shift_idx];
            for emp_idx in 0..self.employees.len() {
                if chromosome.is_assigned(shift_idx, emp_idx) {
                    hours[emp_idx] += duration;
                }
            }
        }
        hours
    }

    /// Coverage ratio in `[0, 1]` with per-shift capping.
    ///
    /// Vacuously 1.0 when there are no employees or no shifts.
    pub fn coverage_ratio(&self, chromosome: &RosterChromosome) -> f64 {
        if self.employees.is_empty() || self.shifts.is_empty() {
            return 1.0;
        }
        let filled: u32 = self
            .shifts
            .iter()
            .enumerate()
            .map(|(shift_idx, shift)| {
                (chromosome.assigned_count(shift_idx) as u32).min(shift.required_staff)
            })
            .sum();
        filled as f64 / self.total_required as f64
    }

    /// Scores a candidate. Pure: same candidate and weights, same score.
    pub fn evaluate(&self, chromosome: &RosterChromosome) -> f64 {
        let hours = self.employee_hours(chromosome);

        let coverage_term = self.coverage_ratio(chromosome) * self.weights.coverage;
        let balance_term = self.balance_score(&hours) * self.weights.balance;
        let preference_term = self.preference_score(chromosome);
        let penalty = self.constraint_penalty(chromosome, &hours);

        (coverage_term + balance_term + preference_term - penalty).max(0.0)
    }

    /// Workload balance in `[0, 1]` from the coefficient of variation of
    /// per-employee hours. Degenerate cases (≤ 1 employee, zero mean)
    /// score 1.0.
    fn balance_score(&self, hours: &[f64]) -> f64 {
        if hours.len() <= 1 {
            return 1.0;
        }
        let mean = hours.iter().sum::<f64>() / hours.len() as f64;
        if mean <= 0.0 {
            return 1.0;
        }
        let variance =
            hours.iter().map(|h| (h - mean) * (h - mean)).sum::<f64>() / hours.len() as f64;
        let cv = variance.sqrt() / mean;
        1.0 - cv.min(1.0)
    }

    /// Preference term in `[0, preference_weight]`.
    ///
    /// Averages the normalized score (`score - 3`, in `[-2, +2]`) over all
    /// assignments, then rescales. Zero when nothing is assigned.
    fn preference_score(&self, chromosome: &RosterChromosome) -> f64 {
        let mut total = 0i64;
        let mut count = 0usize;

        for (shift_idx, shift) in self.shifts.iter().enumerate() {
            for (emp_idx, employee) in self.employees.iter().enumerate() {
                if chromosome.is_assigned(shift_idx, emp_idx) {
                    total += (self.preferences.get_preference(&employee.id, &shift.id)
                        - NEUTRAL_PREFERENCE) as i64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return 0.0;
        }
        let avg = total as f64 / count as f64;
        (avg + 2.0) * (self.weights.preference / 4.0)
    }

    /// Sum of constraint penalties: one `constraint` weight per role
    /// mismatch, time-off overlap, and double-booked shift pair, plus
    /// `excess_hours * constraint` for hour-cap overruns.
    fn constraint_penalty(&self, chromosome: &RosterChromosome, hours: &[f64]) -> f64 {
        let weight = self.weights.constraint;
        let mut penalty = 0.0;

        for (shift_idx, shift) in self.shifts.iter().enumerate() {
            for (emp_idx, employee) in self.employees.iter().enumerate() {
                if !chromosome.is_assigned(shift_idx, emp_idx) {
                    continue;
                }
                if !employee.can_perform(&shift.role_id) {
                    penalty += weight;
                }
                if self
                    .time_off
                    .is_blocked(&employee.id, shift.start_ms, shift.end_ms)
                {
                    penalty += weight;
                }
            }
        }

        for (emp_idx, employee) in self.employees.iter().enumerate() {
            let assigned: Vec<usize> = (0..self.shifts.len())
                .filter(|&shift_idx| chromosome.is_assigned(shift_idx, emp_idx))
                .collect();
            for (i, &a) in assigned.iter().enumerate() {
                for &b in &assigned[i + 1..] {
                    if self.shifts[a].overlaps_shift(&self.shifts[b]) {
                        penalty += weight;
                    }
                }
            }

            let excess = hours[emp_idx] - employee.max_hours;
            if excess > 0.0 {
                penalty += excess * weight;
            }
        }

        penalty
    }

    // ======================== Decoding ========================

    /// Decodes a chromosome into a [`Schedule`].
    pub fn decode(&self, chromosome: &RosterChromosome) -> Schedule {
        let mut schedule = Schedule::new(self.employees.clone(), self.shifts.clone());
        for shift_idx in 0..self.shifts.len() {
            for emp_idx in 0..self.employees.len() {
                if chromosome.is_assigned(shift_idx, emp_idx) {
                    schedule.assign(shift_idx, emp_idx);
                }
            }
        }
        schedule
    }
}
