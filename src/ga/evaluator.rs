//! Fitness evaluation (spec §4.5).

use crate::chromosome::Tour;
use crate::cost_table::CostTable;

/// A tour paired with its fitness, the unit the selector and survival step
/// operate on. An `EvaluatedPopulation` is just `Vec<EvaluatedTour>`
/// (design note: no insertion-order requirement beyond what the sorts in
/// §4.6/§4.8 need).
#[derive(Debug, Clone)]
pub struct EvaluatedTour {
    pub tour: Tour,
    pub fitness: f64,
}

/// Total cost of a tour: the sum of consecutive edge costs, plus the
/// last-to-first edge when `return_to_origin` is set (spec §4.5).
pub fn tour_cost(tour: &Tour, cost_table: &CostTable, return_to_origin: bool) -> f64 {
    let genes = tour.genes();
    let mut cost = 0.0;
    for window in genes.windows(2) {
        cost += cost_table.get(window[0], window[1]);
    }
    if return_to_origin && genes.len() > 1 {
        cost += cost_table.get(genes[genes.len() - 1], genes[0]);
    }
    cost
}

/// Fitness of a tour: `1 / cost(tour)` (spec §4.5). A cost of zero would
/// require `N < 2` or a degenerate table; `GAConfig`'s `N >= 3` rules that
/// out, so this is not guarded here.
pub fn evaluate(tour: &Tour, cost_table: &CostTable, return_to_origin: bool) -> f64 {
    1.0 / tour_cost(tour, cost_table, return_to_origin)
}

/// Evaluates an entire population, pairing each tour with its fitness.
pub fn evaluate_population(
    population: Vec<Tour>,
    cost_table: &CostTable,
    return_to_origin: bool,
) -> Vec<EvaluatedTour> {
    population
        .into_iter()
        .map(|tour| {
            let fitness = evaluate(&tour, cost_table, return_to_origin);
            EvaluatedTour { tour, fitness }
        })
        .collect()
}
