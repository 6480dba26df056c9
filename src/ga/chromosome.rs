//! Binary assignment-matrix chromosome for roster search.
//!
//! # Encoding
//!
//! One gene per (shift, employee) slot, flattened shift-major. A shift's
//! genes form a contiguous block, so single-point crossover at a shift
//! boundary is a single split of the vector and never tears a shift's
//! assignment set apart.

/// Fitness value of a chromosome that has not been evaluated yet.
///
/// Every real fitness is `>= 0`, so the sentinel compares below all of them.
pub const UNEVALUATED_FITNESS: f64 = -1.0;

/// One full candidate assignment of employees to shifts.
///
/// Higher fitness = better roster (maximization convention).
#[derive(Debug, Clone)]
pub struct RosterChromosome {
    /// Shift-major gene matrix, stride = employee count.
    pub(crate) genes: Vec<bool>,
    /// Matrix stride.
    pub(crate) n_employees: usize,
    /// Cached fitness ([`UNEVALUATED_FITNESS`] until evaluated).
    pub fitness: f64,
}

impl RosterChromosome {
    /// Creates an all-unassigned chromosome.
    pub fn empty(n_shifts: usize, n_employees: usize) -> Self {
        Self {
            genes: vec![false; n_shifts * n_employees],
            n_employees,
            fitness: UNEVALUATED_FITNESS,
        }
    }

    /// Rebuilds a chromosome from raw genes.
    ///
    /// `genes.len()` must be a multiple of `n_employees`.
    pub(crate) fn from_genes(genes: Vec<bool>, n_employees: usize) -> Self {
        debug_assert!(n_employees == 0 || genes.len() % n_employees == 0);
        Self {
            genes,
            n_employees,
            fitness: UNEVALUATED_FITNESS,
        }
    }

    /// Number of shifts encoded.
    #[inline]
    pub fn shift_count(&self) -> usize {
        if self.n_employees == 0 {
            0
        } else {
            self.genes.len() / self.n_employees
        }
    }

    /// Number of employees encoded.
    #[inline]
    pub fn employee_count(&self) -> usize {
        self.n_employees
    }

    /// Whether an employee is assigned to a shift.
    #[inline]
    pub fn is_assigned(&self, shift_idx: usize, employee_idx: usize) -> bool {
        self.genes[shift_idx * self.n_employees + employee_idx]
    }

    /// Sets or clears one assignment slot.
    #[inline]
    pub fn set(&mut self, shift_idx: usize, employee_idx: usize, assigned: bool) {
        self.genes[shift_idx * self.n_employees + employee_idx] = assigned;
    }

    /// Clears every assignment for a shift.
    pub fn clear_shift(&mut self, shift_idx: usize) {
        let start = shift_idx * self.n_employees;
        for gene in &mut self.genes[start..start + self.n_employees] {
            *gene = false;
        }
    }

    /// Employee indices assigned to a shift.
    pub fn assigned_to(&self, shift_idx: usize) -> Vec<usize> {
        let start = shift_idx * self.n_employees;
        self.genes[start..start + self.n_employees]
            .iter()
            .enumerate()
            .filter(|(_, &g)| g)
            .map(|(emp_idx, _)| emp_idx)
            .collect()
    }

    /// Number of employees assigned to a shift.
    pub fn assigned_count(&self, shift_idx: usize) -> usize {
        let start = shift_idx * self.n_employees;
        self.genes[start..start + self.n_employees]
            .iter()
            .filter(|&&g| g)
            .count()
    }

    /// Total number of set genes.
    pub fn assignment_count(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// A copy with the fitness cache reset.
    pub fn reset_clone(&self) -> Self {
        Self {
            genes: self.genes.clone(),
            n_employees: self.n_employees,
            fitness: UNEVALUATED_FITNESS,
        }
    }

    /// Whether the fitness cache holds a real evaluation.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness >= 0.0
    }
}
