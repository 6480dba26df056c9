//! Genetic operators for roster chromosomes.
//!
//! Selection, crossover, and mutation over the shift-major gene matrix.
//! None of the operators repairs constraint violations in offspring;
//! cleanup is the job of mutation's fresh redraws combined with the
//! penalty-driven selection pressure.

use rand::prelude::IndexedRandom;
use rand::seq::index;
use rand::Rng;

use super::chromosome::RosterChromosome;
use super::problem::RosterProblem;

/// Chance that a mutated shift is cleared instead of redrawn.
const MUTATION_CLEAR_CHANCE: f64 = 0.5;

/// Tournament selection.
///
/// Builds a mating pool the size of the population: each slot is won by
/// the fittest of `tournament_size` candidates drawn uniformly without
/// replacement (tournaments themselves overlap freely). Candidates must
/// already carry evaluated fitness.
pub fn tournament_selection<R: Rng>(
    population: &[RosterChromosome],
    tournament_size: usize,
    rng: &mut R,
) -> Vec<RosterChromosome> {
    if population.is_empty() {
        return Vec::new();
    }
    let size = tournament_size.clamp(1, population.len());

    (0..population.len())
        .map(|_| {
            let mut winner = 0usize;
            let mut winner_fitness = f64::NEG_INFINITY;
            for candidate in index::sample(rng, population.len(), size) {
                if population[candidate].fitness > winner_fitness {
                    winner = candidate;
                    winner_fitness = population[candidate].fitness;
                }
            }
            population[winner].clone()
        })
        .collect()
}

/// Single-point crossover at a shift-block boundary.
///
/// With probability `crossover_rate` (must be in `[0, 1]`), splits both
/// parents at one random shift boundary and swaps the tails; otherwise the
/// children are plain copies. Children always come back with reset fitness.
pub fn single_point_crossover<R: Rng>(
    parent1: &RosterChromosome,
    parent2: &RosterChromosome,
    crossover_rate: f64,
    rng: &mut R,
) -> (RosterChromosome, RosterChromosome) {
    let n_shifts = parent1.shift_count();
    if n_shifts < 2 || !rng.random_bool(crossover_rate) {
        return (parent1.reset_clone(), parent2.reset_clone());
    }

    let cut = rng.random_range(1..n_shifts) * parent1.employee_count();

    let mut genes1 = parent1.genes[..cut].to_vec();
    genes1.extend_from_slice(&parent2.genes[cut..]);
    let mut genes2 = parent2.genes[..cut].to_vec();
    genes2.extend_from_slice(&parent1.genes[cut..]);

    (
        RosterChromosome::from_genes(genes1, parent1.employee_count()),
        RosterChromosome::from_genes(genes2, parent2.employee_count()),
    )
}

/// Per-shift reassignment mutation.
///
/// Each shift mutates independently with probability `mutation_rate`: its
/// assignment set is cleared, then — half the time — replaced with a fresh
/// random draw from the employees that are role-qualified and still within
/// their hours budget. Conflicts the redraw creates with the employee's
/// other shifts are not repaired; the fitness penalty discourages them.
pub fn reassign_mutation<R: Rng>(
    chromosome: &mut RosterChromosome,
    problem: &RosterProblem,
    mutation_rate: f64,
    rng: &mut R,
) {
    if mutation_rate <= 0.0 {
        return;
    }

    for shift_idx in 0..chromosome.shift_count() {
        if !rng.random_bool(mutation_rate.min(1.0)) {
            continue;
        }

        chromosome.clear_shift(shift_idx);
        chromosome.fitness = super::chromosome::UNEVALUATED_FITNESS;

        if rng.random_bool(MUTATION_CLEAR_CHANCE) {
            continue;
        }

        let hours = problem.employee_hours(chromosome);
        let eligible = problem.mutation_eligible(shift_idx, &hours);
        let take = (problem.shifts[shift_idx].required_staff as usize).min(eligible.len());
        let picked: Vec<usize> = eligible.choose_multiple(rng, take).copied().collect();
        for emp_idx in picked {
            chromosome.set(shift_idx, emp_idx, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Shift};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const HOUR: i64 = 3_600_000;

    fn make_problem() -> RosterProblem {
        let employees = vec![
            Employee::new("E1").with_role("r1"),
            Employee::new("E2").with_role("r1"),
            Employee::new("E3").with_role("r1"),
        ];
        let shifts = vec![
            Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap(),
            Shift::new("S2", 8 * HOUR, 16 * HOUR, "r1", 2).unwrap(),
            Shift::new("S3", 16 * HOUR, 24 * HOUR, "r1", 1).unwrap(),
        ];
        RosterProblem::new(employees, shifts)
    }

    fn evaluated_population(problem: &RosterProblem, size: usize, rng: &mut SmallRng) -> Vec<RosterChromosome> {
        (0..size)
            .map(|_| {
                let mut ch = problem.create_individual(rng);
                ch.fitness = problem.evaluate(&ch);
                ch
            })
            .collect()
    }

    #[test]
    fn test_tournament_selection_pool_size() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let population = evaluated_population(&problem, 10, &mut rng);

        let selected = tournament_selection(&population, 3, &mut rng);
        assert_eq!(selected.len(), 10);
    }

    #[test]
    fn test_tournament_favors_fitter() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let population = evaluated_population(&problem, 10, &mut rng);
        let best = population
            .iter()
            .map(|c| c.fitness)
            .fold(f64::NEG_INFINITY, f64::max);

        // Full-population tournaments always pick the best.
        let selected = tournament_selection(&population, 10, &mut rng);
        assert!(selected.iter().all(|c| c.fitness == best));
    }

    #[test]
    fn test_tournament_empty_population() {
        let mut rng = SmallRng::seed_from_u64(42);
        let selected = tournament_selection(&[], 3, &mut rng);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut p1 = RosterChromosome::empty(3, 3);
        let mut p2 = RosterChromosome::empty(3, 3);
        // p1 assigns E1 everywhere, p2 assigns E2 everywhere.
        for shift_idx in 0..3 {
            p1.set(shift_idx, 0, true);
            p2.set(shift_idx, 1, true);
        }

        let (c1, c2) = single_point_crossover(&p1, &p2, 1.0, &mut rng);

        // Each shift in a child comes wholesale from one parent.
        for shift_idx in 0..3 {
            let from_p1 = c1.is_assigned(shift_idx, 0) && !c1.is_assigned(shift_idx, 1);
            let from_p2 = c1.is_assigned(shift_idx, 1) && !c1.is_assigned(shift_idx, 0);
            assert!(from_p1 || from_p2);
        }
        // Genes are conserved across the pair.
        assert_eq!(c1.assignment_count() + c2.assignment_count(), 6);
        assert!(!c1.is_evaluated());
        assert!(!c2.is_evaluated());
    }

    #[test]
    fn test_crossover_rate_zero_copies() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = problem.create_individual(&mut rng);
        let p2 = problem.create_individual(&mut rng);

        let (c1, c2) = single_point_crossover(&p1, &p2, 0.0, &mut rng);
        assert_eq!(c1.genes, p1.genes);
        assert_eq!(c2.genes, p2.genes);
    }

    #[test]
    fn test_crossover_single_shift_copies() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = RosterChromosome::empty(1, 2);
        let p2 = RosterChromosome::empty(1, 2);
        // No interior boundary to cut at.
        let (c1, _) = single_point_crossover(&p1, &p2, 1.0, &mut rng);
        assert_eq!(c1.genes, p1.genes);
    }

    #[test]
    fn test_mutation_changes_assignments() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let original = problem.create_individual(&mut rng);

        let mut changed = false;
        for _ in 0..50 {
            let mut ch = original.reset_clone();
            reassign_mutation(&mut ch, &problem, 0.5, &mut rng);
            if ch.genes != original.genes {
                changed = true;
                break;
            }
        }
        assert!(changed, "mutation should eventually alter a candidate");
    }

    #[test]
    fn test_mutation_respects_role_and_budget() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..30 {
            let mut ch = problem.create_individual(&mut rng);
            reassign_mutation(&mut ch, &problem, 1.0, &mut rng);

            for shift_idx in 0..problem.shifts.len() {
                for emp_idx in ch.assigned_to(shift_idx) {
                    assert!(problem.employees[emp_idx]
                        .can_perform(&problem.shifts[shift_idx].role_id));
                }
                assert!(
                    ch.assigned_count(shift_idx)
                        <= problem.shifts[shift_idx].required_staff as usize
                );
            }
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_noop() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = problem.create_individual(&mut rng);
        let before = ch.genes.clone();

        reassign_mutation(&mut ch, &problem, 0.0, &mut rng);
        assert_eq!(ch.genes, before);
    }
}
