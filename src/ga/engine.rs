//! Generation-loop runner.
//!
//! Owns the evolve cycle: evaluate → track best-so-far → record stats →
//! time check → elitism + selection + crossover + mutation. The time
//! limit is cooperative and checked once per generation boundary, so a
//! slow generation can overshoot the budget; the run still returns the
//! best schedule seen, never an error.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, SchedulingError};
use crate::models::Schedule;

use super::chromosome::{RosterChromosome, UNEVALUATED_FITNESS};
use super::operators::{reassign_mutation, single_point_crossover, tournament_selection};
use super::problem::RosterProblem;

/// Genetic algorithm parameters.
///
/// # Example
///
/// ```
/// use rotagen::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of candidates per generation.
    pub population_size: usize,
    /// Maximum number of generations.
    pub max_generations: usize,
    /// Probability that a parent pair is recombined (0..=1).
    pub crossover_rate: f64,
    /// Per-shift mutation probability (0..=1).
    pub mutation_rate: f64,
    /// Candidates copied unchanged into the next generation.
    pub elite_size: usize,
    /// Candidates drawn per selection tournament.
    pub tournament_size: usize,
    /// Wall-clock budget for the run (None = unlimited).
    pub time_limit: Option<Duration>,
    /// Seed for the run's random source (None = from the OS).
    pub seed: Option<u64>,
    /// Evaluate fitness across rayon worker threads.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            elite_size: 5,
            tournament_size: 3,
            time_limit: None,
            seed: None,
            parallel: true,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-shift mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_size(mut self, size: usize) -> Self {
        self.elite_size = size;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Seeds the run's random source for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Fails fast on unusable parameters, before any population exists.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SchedulingError::InvalidParameter(
                "population_size must be positive".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SchedulingError::InvalidParameter(
                "max_generations must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(SchedulingError::InvalidParameter(format!(
                "crossover_rate {} is outside [0, 1]",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SchedulingError::InvalidParameter(format!(
                "mutation_rate {} is outside [0, 1]",
                self.mutation_rate
            )));
        }
        if self.elite_size > self.population_size {
            return Err(SchedulingError::InvalidParameter(format!(
                "elite_size {} exceeds population_size {}",
                self.elite_size, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(SchedulingError::InvalidParameter(
                "tournament_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Statistics recorded at each generation.
#[derive(Debug, Clone)]
pub struct GenerationStats {
    /// Generation index (0-based).
    pub generation: usize,
    /// Best fitness within this generation.
    pub best_fitness: f64,
    /// Mean fitness across the generation.
    pub mean_fitness: f64,
    /// Coverage percentage of the generation's best candidate.
    pub coverage_percent: f64,
    /// Wall-clock time this generation took.
    pub duration: Duration,
}

/// The result of an optimization run.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Best schedule seen across all generations.
    pub schedule: Schedule,
    /// Fitness of that schedule.
    pub best_fitness: f64,
    /// Number of generations actually completed.
    pub generations: usize,
    /// Per-generation statistics series.
    pub stats: Vec<GenerationStats>,
    /// Total run duration.
    pub duration: Duration,
}

/// Drives the generation loop for a [`RosterProblem`].
pub struct GaRunner;

impl GaRunner {
    /// Runs the genetic algorithm and returns the best schedule seen.
    ///
    /// Fails fast on invalid parameters; infeasibility and time-out are
    /// reported through coverage gaps and a truncated stats series, never
    /// through `Err`.
    pub fn run(problem: &RosterProblem, config: &GaConfig) -> Result<ScheduleOutcome> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        info!(
            employees = problem.employees.len(),
            shifts = problem.shifts.len(),
            population_size = config.population_size,
            max_generations = config.max_generations,
            "starting schedule generation"
        );
        let run_start = Instant::now();

        let mut population: Vec<RosterChromosome> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        // Best-so-far across all generations; replaced at the first
        // evaluation since every real fitness is >= 0.
        let mut best = population[0].clone();
        let mut best_fitness = UNEVALUATED_FITNESS;
        let mut stats: Vec<GenerationStats> = Vec::new();

        for generation in 0..config.max_generations {
            let generation_start = Instant::now();

            Self::evaluate_population(problem, &mut population, config.parallel);

            let mut generation_best = 0usize;
            let mut fitness_sum = 0.0;
            for (idx, candidate) in population.iter().enumerate() {
                fitness_sum += candidate.fitness;
                if candidate.fitness > population[generation_best].fitness {
                    generation_best = idx;
                }
            }
            let generation_best_fitness = population[generation_best].fitness;

            if generation_best_fitness > best_fitness {
                best = population[generation_best].clone();
                best_fitness = generation_best_fitness;
            }

            let coverage_percent =
                problem.coverage_ratio(&population[generation_best]) * 100.0;
            stats.push(GenerationStats {
                generation,
                best_fitness: generation_best_fitness,
                mean_fitness: fitness_sum / population.len() as f64,
                coverage_percent,
                duration: generation_start.elapsed(),
            });
            debug!(
                generation,
                best_fitness = generation_best_fitness,
                coverage_percent,
                "generation complete"
            );

            // Cooperative time check, once per generation boundary.
            if let Some(limit) = config.time_limit {
                if run_start.elapsed() >= limit {
                    break;
                }
            }
            if generation + 1 == config.max_generations {
                break;
            }

            population = Self::breed(problem, &population, config, &mut rng);
        }

        let duration = run_start.elapsed();
        info!(
            duration_ms = duration.as_millis() as u64,
            best_fitness,
            generations = stats.len(),
            "schedule generation completed"
        );

        Ok(ScheduleOutcome {
            schedule: problem.decode(&best),
            best_fitness,
            generations: stats.len(),
            stats,
            duration,
        })
    }

    fn evaluate_population(
        problem: &RosterProblem,
        population: &mut [RosterChromosome],
        parallel: bool,
    ) {
        if parallel {
            population
                .par_iter_mut()
                .for_each(|candidate| candidate.fitness = problem.evaluate(candidate));
        } else {
            for candidate in population.iter_mut() {
                candidate.fitness = problem.evaluate(candidate);
            }
        }
    }

    /// Builds the next generation: elites verbatim, the rest from
    /// tournament-selected parents via crossover and mutation.
    fn breed<R: Rng>(
        problem: &RosterProblem,
        population: &[RosterChromosome],
        config: &GaConfig,
        rng: &mut R,
    ) -> Vec<RosterChromosome> {
        let mut next = Vec::with_capacity(config.population_size);

        let mut order: Vec<usize> = (0..population.len()).collect();
        order.sort_by(|&a, &b| {
            population[b]
                .fitness
                .partial_cmp(&population[a].fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for &idx in order.iter().take(config.elite_size) {
            next.push(population[idx].clone());
        }

        let selected = tournament_selection(population, config.tournament_size, rng);

        while next.len() < config.population_size {
            let parent1 = &selected[rng.random_range(0..selected.len())];
            let parent2 = &selected[rng.random_range(0..selected.len())];

            let (mut child1, mut child2) =
                single_point_crossover(parent1, parent2, config.crossover_rate, rng);
            reassign_mutation(&mut child1, problem, config.mutation_rate, rng);
            reassign_mutation(&mut child2, problem, config.mutation_rate, rng);

            next.push(child1);
            if next.len() < config.population_size {
                next.push(child2);
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Shift, TimeOffCalendar};

    const HOUR: i64 = 3_600_000;

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(15)
            .with_seed(42)
            .with_parallel(false)
    }

    fn make_problem() -> RosterProblem {
        let employees = vec![
            Employee::new("E1").with_max_hours(40.0).with_role("r1"),
            Employee::new("E2").with_max_hours(40.0).with_role("r1"),
            Employee::new("E3").with_max_hours(40.0).with_role("r2"),
        ];
        let shifts = vec![
            Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap(),
            Shift::new("S2", 8 * HOUR, 16 * HOUR, "r1", 2).unwrap(),
            Shift::new("S3", 24 * HOUR, 32 * HOUR, "r2", 1).unwrap(),
        ];
        RosterProblem::new(employees, shifts)
    }

    #[test]
    fn test_run_returns_outcome() {
        let problem = make_problem();
        let outcome = GaRunner::run(&problem, &small_config()).unwrap();

        assert!(outcome.best_fitness >= 0.0);
        assert_eq!(outcome.generations, 15);
        assert_eq!(outcome.stats.len(), 15);
        assert_eq!(outcome.schedule.shifts.len(), 3);
    }

    #[test]
    fn test_full_coverage_reachable() {
        let problem = make_problem();
        let outcome = GaRunner::run(&problem, &small_config()).unwrap();
        // 3 qualified employees for 4 positions with no conflicts: the
        // seeded population already covers everything.
        assert!((outcome.schedule.coverage().percent - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_elitism_monotonic_best() {
        let problem = make_problem();
        let outcome = GaRunner::run(&problem, &small_config()).unwrap();

        for pair in outcome.stats.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness,
                "per-generation best regressed: {} -> {}",
                pair[0].best_fitness,
                pair[1].best_fitness
            );
        }
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let problem = make_problem();
        let a = GaRunner::run(&problem, &small_config()).unwrap();
        let b = GaRunner::run(&problem, &small_config()).unwrap();

        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.schedule.assignments, b.schedule.assignments);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = make_problem();
        let sequential = GaRunner::run(&problem, &small_config()).unwrap();
        let parallel = GaRunner::run(&problem, &small_config().with_parallel(true)).unwrap();

        // Evaluation is pure; threading it cannot change the result.
        assert_eq!(sequential.best_fitness, parallel.best_fitness);
        assert_eq!(sequential.schedule.assignments, parallel.schedule.assignments);
    }

    #[test]
    fn test_time_limit_returns_best_so_far() {
        let problem = make_problem();
        let config = small_config()
            .with_max_generations(1_000_000)
            .with_time_limit(Duration::from_millis(50));

        let outcome = GaRunner::run(&problem, &config).unwrap();
        assert!(outcome.generations >= 1);
        assert!(outcome.generations < 1_000_000);
        assert!(outcome.best_fitness >= 0.0);
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        let problem = make_problem();

        for config in [
            GaConfig::default().with_population_size(0),
            GaConfig::default().with_max_generations(0),
            GaConfig::default().with_crossover_rate(1.5),
            GaConfig::default().with_mutation_rate(-0.1),
            GaConfig::default().with_population_size(5).with_elite_size(6),
            GaConfig::default().with_tournament_size(0),
        ] {
            let err = GaRunner::run(&problem, &config).unwrap_err();
            assert!(matches!(err, SchedulingError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_empty_inputs_are_vacuous() {
        let no_employees = RosterProblem::new(
            vec![],
            vec![Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap()],
        );
        let outcome = GaRunner::run(&no_employees, &small_config()).unwrap();
        assert!(outcome.best_fitness >= 0.0);
        assert_eq!(outcome.schedule.assignment_count(), 0);

        let no_shifts = RosterProblem::new(vec![Employee::new("E1")], vec![]);
        let outcome = GaRunner::run(&no_shifts, &small_config()).unwrap();
        assert!(outcome.best_fitness >= 0.0);
    }

    #[test]
    fn test_time_off_respected_in_best() {
        let employees = vec![
            Employee::new("away").with_role("r1"),
            Employee::new("here").with_role("r1"),
        ];
        let shifts = vec![Shift::new("S1", 0, 8 * HOUR, "r1", 1).unwrap()];
        let mut time_off = TimeOffCalendar::new();
        time_off.add("away", 0, 24 * HOUR);
        let problem = RosterProblem::new(employees, shifts).with_time_off(time_off);

        let outcome = GaRunner::run(&problem, &small_config()).unwrap();
        let assigned = outcome.schedule.assigned_employees("S1");
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, "here");
    }
}
