//! Genetic algorithm components for the TSP solver.
//!
//! - [`seeder`] — initial population construction (nearest-neighbor + random)
//! - [`evaluator`] — tour cost and fitness
//! - [`selector`] — random and roulette-wheel parent selection
//! - [`variation`] — mutation and crossover operators
//! - [`survival`] — elite-preserving generational replacement
//! - [`engine`] — the top-level generation loop and [`SolvedProblem`](crate::models::SolvedProblem) assembly

pub mod engine;
pub mod evaluator;
pub mod seeder;
pub mod selector;
pub mod survival;
pub mod variation;

pub use engine::{solve, CancellationToken};
pub use evaluator::{evaluate, evaluate_population, tour_cost, EvaluatedTour};
pub use seeder::seed_population;
pub use selector::{select_random, select_roulette_pair};
pub use survival::survive;
pub use variation::{crossover, mutate};
