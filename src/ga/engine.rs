//! Top-level GA state machine (spec §4.9).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::chromosome::Tour;
use crate::cost_table::CostTable;
use crate::error::Result;
use crate::models::{GAConfig, SolvedProblem};

use super::evaluator::{evaluate_population, tour_cost, EvaluatedTour};
use super::seeder::seed_population;
use super::selector::{select_random, select_roulette_pair};
use super::survival::survive;
use super::variation::{crossover, mutate};

/// A cooperative cancellation signal checked at generation boundaries
/// (spec §5). Cloning shares the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The explicit, threaded solve state (design note: no self-mutating
/// engine object — the loop below returns the final value of this struct
/// rather than mutating shared fields on `self`).
#[derive(Debug, Clone)]
struct SolveState {
    generation: u32,
    population: Vec<EvaluatedTour>,
    best_cost: f64,
    best_cost_generation: u32,
    best_solution: Tour,
    best_cost_history: Vec<f64>,
    worst_cost: f64,
    worst_cost_generation: u32,
    worst_cost_history: Vec<f64>,
}

impl SolveState {
    fn register(&mut self, cost_table: &CostTable, return_to_origin: bool) {
        let mut sorted = self.population.clone();
        sorted.sort_by(|a, b| a.fitness.partial_cmp(&b.fitness).expect("fitness is comparable"));

        let worst_entry = sorted.first().expect("population must be non-empty");
        let best_entry = sorted.last().expect("population must be non-empty");

        let worst_cost = tour_cost(&worst_entry.tour, cost_table, return_to_origin);
        let best_cost = tour_cost(&best_entry.tour, cost_table, return_to_origin);

        if best_cost < self.best_cost {
            self.best_cost = best_cost;
            self.best_cost_generation = self.generation;
            self.best_solution = best_entry.tour.clone();
        }
        if worst_cost > self.worst_cost {
            self.worst_cost = worst_cost;
            self.worst_cost_generation = self.generation;
        }

        self.best_cost_history.push(best_cost);
        self.worst_cost_history.push(worst_cost);

        debug!(
            generation = self.generation,
            best_cost = best_cost,
            worst_cost = worst_cost,
            "registered generation stats"
        );
    }
}

/// Runs the genetic algorithm to termination (spec §4.9) and returns the
/// solved-problem record.
///
/// `cancel`, if provided, is checked only at generation boundaries (spec
/// §5) — it does not interrupt mid-generation work.
pub fn solve<R: Rng + ?Sized>(
    cost_table: &CostTable,
    config: &GAConfig,
    rng: &mut R,
    cancel: Option<&CancellationToken>,
) -> Result<SolvedProblem> {
    config.validate()?;
    let started_at = Instant::now();

    let initial_population = seed_population(cost_table, config, rng);
    let evaluated = evaluate_population(initial_population, cost_table, config.return_to_origin);

    let seed_best = evaluated
        .iter()
        .cloned()
        .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).expect("fitness comparable"))
        .expect("seeded population is non-empty");

    let mut state = SolveState {
        generation: 1,
        population: evaluated,
        best_cost: f64::INFINITY,
        best_cost_generation: 1,
        best_solution: seed_best.tour.clone(),
        best_cost_history: Vec::new(),
        worst_cost: 0.0,
        worst_cost_generation: 1,
        worst_cost_history: Vec::new(),
    };
    state.register(cost_table, config.return_to_origin);

    let is_small_problem = config.is_small_problem();

    if !is_small_problem {
        loop {
            if should_terminate(&state, config, cancel) {
                break;
            }
            evolve_one_generation(&mut state, cost_table, config, rng)?;
            state.generation += 1;
            state.register(cost_table, config.return_to_origin);
        }
    }

    debug!(generations = state.generation, best_cost = state.best_cost, "solve finished");

    Ok(SolvedProblem {
        solution: state.best_solution.genes().to_vec(),
        best_cost: state.best_cost,
        worst_cost: state.worst_cost,
        best_cost_generation: state.best_cost_generation,
        worst_cost_generation: state.worst_cost_generation,
        best_cost_history: state.best_cost_history,
        worst_cost_history: state.worst_cost_history,
        generations_processed: state.generation,
        solved_in_ms: started_at.elapsed().as_millis() as u64,
    })
}

fn should_terminate(state: &SolveState, config: &GAConfig, cancel: Option<&CancellationToken>) -> bool {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return true;
        }
    }
    if state.generation > config.max_generations {
        return true;
    }
    if state.generation.saturating_sub(state.best_cost_generation) > config.max_chromosome_age {
        return true;
    }
    false
}

/// One generation step: mutation pool, crossover fill, evaluate, survive.
fn evolve_one_generation<R: Rng + ?Sized>(
    state: &mut SolveState,
    cost_table: &CostTable,
    config: &GAConfig,
    rng: &mut R,
) -> Result<()> {
    let population_size = state.population.len();
    let is_large = (config.permutation_space_size() as f64) > population_size as f64;

    let previous_keys: HashSet<Vec<usize>> = state
        .population
        .iter()
        .map(|e| e.tour.canonical_key().to_vec())
        .collect();

    let mutation_count =
        ((population_size as u64 * config.mutation_rate_percent as u64) / 100).max(1) as usize;

    let mut new_tours: Vec<Tour> = Vec::with_capacity(population_size);
    let mut new_keys: HashSet<Vec<usize>> = HashSet::new();

    let mut attempts = mutation_count * 32 + 64;
    while new_tours.len() < mutation_count && attempts > 0 {
        attempts -= 1;
        let parent = select_random(&state.population, rng)?;
        let child = mutate(&parent.tour, config.fixed_origin_index, rng);
        let key = child.canonical_key().to_vec();
        if new_keys.contains(&key) {
            continue;
        }
        if is_large && previous_keys.contains(&key) {
            continue;
        }
        new_keys.insert(key);
        new_tours.push(child);
    }

    let mut attempts = population_size * 32 + 256;
    while new_tours.len() < population_size && attempts > 0 {
        attempts -= 1;
        let (parent_a, parent_b) = select_roulette_pair(&state.population, rng)?;
        let (child_a, child_b) = crossover(&parent_a.tour, &parent_b.tour, config.fixed_origin_index, rng)?;

        for child in [child_a, child_b] {
            if new_tours.len() >= population_size {
                break;
            }
            let key = child.canonical_key().to_vec();
            if new_keys.contains(&key) {
                continue;
            }
            if is_large && previous_keys.contains(&key) {
                continue;
            }
            new_keys.insert(key);
            new_tours.push(child);
        }
    }

    // If duplicate-avoidance attempts ran out before reaching full size
    // (possible only in small permutation spaces, which this loop never
    // runs for), top up with fresh crossover offspring regardless of
    // duplication so population size is always preserved.
    while new_tours.len() < population_size {
        let (parent_a, parent_b) = select_roulette_pair(&state.population, rng)?;
        let (child_a, _) = crossover(&parent_a.tour, &parent_b.tour, config.fixed_origin_index, rng)?;
        new_tours.push(child_a);
    }

    let new_evaluated = evaluate_population(new_tours, cost_table, config.return_to_origin);
    let previous = std::mem::replace(&mut state.population, Vec::new());
    state.population = survive(previous, new_evaluated, config.elite_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_table::CostTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn symmetric_4node() -> CostTable {
        CostTable::from_rows(
            4,
            vec![
                0.0, 1.0, 2.0, 3.0, //
                1.0, 0.0, 1.0, 2.0, //
                2.0, 1.0, 0.0, 1.0, //
                3.0, 2.0, 1.0, 0.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn symmetric_4node_finds_optimal_tour() {
        let table = symmetric_4node();
        let config = GAConfig::new(4)
            .with_fixed_origin_index(0)
            .with_return_to_origin(true)
            .with_population_size(6)
            .with_max_generations(50);
        let mut rng = StdRng::seed_from_u64(1);
        let result = solve(&table, &config, &mut rng, None).unwrap();
        assert_eq!(result.best_cost, 6.0);
        assert!(result.solution == vec![0, 1, 2, 3] || result.solution == vec![0, 3, 2, 1]);
    }

    #[test]
    fn asymmetric_3node_terminates_on_small_problem_path() {
        let table = CostTable::from_rows(3, vec![0.0, 10.0, 15.0, 20.0, 0.0, 5.0, 8.0, 12.0, 0.0]).unwrap();
        let config = GAConfig::new(3).with_population_size(10).with_return_to_origin(true);
        let mut rng = StdRng::seed_from_u64(2);
        let result = solve(&table, &config, &mut rng, None).unwrap();
        assert_eq!(result.generations_processed, 1);
        assert_eq!(result.best_cost, 23.0);
    }

    /// A 5-node line distance table. With a fixed origin the permutation
    /// space is 4! = 24, comfortably larger than the population sizes used
    /// below, so these tests exercise the real generational loop rather
    /// than the small-problem path.
    fn line_5node() -> CostTable {
        let mut table = CostTable::new(5);
        for i in 0..5 {
            for j in 0..5 {
                if i != j {
                    table.set(i, j, (i as f64 - j as f64).abs());
                }
            }
        }
        table
    }

    #[test]
    fn best_cost_is_monotonically_non_increasing() {
        let table = line_5node();
        let config = GAConfig::new(5)
            .with_fixed_origin_index(0)
            .with_population_size(10)
            .with_max_generations(30);
        let mut rng = StdRng::seed_from_u64(3);
        let result = solve(&table, &config, &mut rng, None).unwrap();
        assert!(result.generations_processed > 1);
        for window in result.best_cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn worst_cost_is_monotonically_non_decreasing() {
        let table = line_5node();
        let config = GAConfig::new(5)
            .with_fixed_origin_index(0)
            .with_population_size(10)
            .with_max_generations(30);
        let mut rng = StdRng::seed_from_u64(4);
        let result = solve(&table, &config, &mut rng, None).unwrap();
        for window in result.worst_cost_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn best_cost_history_matches_recorded_generation() {
        let table = line_5node();
        let config = GAConfig::new(5)
            .with_fixed_origin_index(0)
            .with_population_size(10)
            .with_max_generations(30);
        let mut rng = StdRng::seed_from_u64(5);
        let result = solve(&table, &config, &mut rng, None).unwrap();
        let index = (result.best_cost_generation - 1) as usize;
        assert_eq!(result.best_cost_history[index], result.best_cost);
    }

    #[test]
    fn large_problem_with_zero_max_generations_returns_seed_stats_only() {
        let mut table = CostTable::new(50);
        for i in 0..50 {
            for j in 0..50 {
                if i != j {
                    table.set(i, j, (i as f64 - j as f64).abs());
                }
            }
        }
        let config = GAConfig::new(50).with_population_size(20).with_max_generations(0);
        let mut rng = StdRng::seed_from_u64(6);
        let result = solve(&table, &config, &mut rng, None).unwrap();
        assert_eq!(result.generations_processed, 1);
        assert_eq!(result.best_cost_history.len(), 1);
    }

    #[test]
    fn cancellation_token_stops_before_next_generation() {
        let table = line_5node();
        let config = GAConfig::new(5)
            .with_fixed_origin_index(0)
            .with_population_size(10)
            .with_max_generations(1000);
        let mut rng = StdRng::seed_from_u64(7);
        let token = CancellationToken::new();
        token.cancel();
        let result = solve(&table, &config, &mut rng, Some(&token)).unwrap();
        assert_eq!(result.generations_processed, 1);
    }
}
