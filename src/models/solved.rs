//! The solver's output record (spec §3, §6).

use serde::{Deserialize, Serialize};

/// The result of a completed solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedProblem {
    /// Best tour found, as a sequence of node indices.
    pub solution: Vec<usize>,
    /// Cost of the best tour.
    pub best_cost: f64,
    /// Cost of the worst tour in the final generation.
    pub worst_cost: f64,
    /// Generation at which `best_cost` was first observed.
    pub best_cost_generation: u32,
    /// Generation at which `worst_cost` was first observed.
    pub worst_cost_generation: u32,
    /// Best cost observed at each generation, in order.
    pub best_cost_history: Vec<f64>,
    /// Worst cost observed at each generation, in order.
    pub worst_cost_history: Vec<f64>,
    /// Total number of generations processed.
    pub generations_processed: u32,
    /// Wall-clock time spent solving, in milliseconds.
    pub solved_in_ms: u64,
}
