//! Initial population construction: nearest-neighbor + random pools (spec §4.4).

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::chromosome::Tour;
use crate::cost_table::CostTable;
use crate::models::GAConfig;

/// Builds the initial population of `config.effective_population_size()`
/// tours: an NNA pool sized by `nna_percentage`, topped up with uniform
/// random permutations. Duplicates (keyed on the ordered sequence) are
/// rejected across both pools; the seeder regenerates until the target
/// size is reached.
pub fn seed_population<R: Rng + ?Sized>(
    cost_table: &CostTable,
    config: &GAConfig,
    rng: &mut R,
) -> Vec<Tour> {
    let dimension = config.dimension;
    let target_size = config.effective_population_size();
    let origin = config.fixed_origin_index;

    let distinct_starts = if origin.is_some() {
        dimension.saturating_sub(1)
    } else {
        dimension
    };
    let nna_target = ((config.nna_percentage as u64 * target_size as u64 + 50) / 100) as usize;
    let nna_count = nna_target.min(distinct_starts).min(target_size);

    let mut population = Vec::with_capacity(target_size);
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    let mut attempts_budget = target_size.max(1) * 64 + 256;
    while population.len() < nna_count && attempts_budget > 0 {
        attempts_budget -= 1;
        let tour = nearest_neighbor_tour(cost_table, dimension, origin, rng);
        if seen.insert(tour.canonical_key().to_vec()) {
            population.push(tour);
        }
    }

    while population.len() < target_size && attempts_budget > 0 {
        attempts_budget -= 1;
        let tour = random_tour(dimension, origin, rng);
        if seen.insert(tour.canonical_key().to_vec()) {
            population.push(tour);
        }
    }

    population
}

/// Builds one nearest-neighbor tour: the fixed origin (if any) at
/// position 0, then a random unvisited starting node, then greedy
/// extension by minimum cost from the current tail (first-found tie
/// break).
pub fn nearest_neighbor_tour<R: Rng + ?Sized>(
    cost_table: &CostTable,
    dimension: usize,
    fixed_origin: Option<usize>,
    rng: &mut R,
) -> Tour {
    let mut visited = vec![false; dimension];
    let mut genes = Vec::with_capacity(dimension);

    if let Some(origin) = fixed_origin {
        visited[origin] = true;
        genes.push(origin);
    }

    let unvisited: Vec<usize> = (0..dimension).filter(|&n| !visited[n]).collect();
    if let Some(&start) = unvisited.choose(rng) {
        visited[start] = true;
        genes.push(start);
    }

    while genes.len() < dimension {
        let tail = *genes.last().expect("genes non-empty while loop runs");
        let row = cost_table.row(tail);
        let mut best: Option<(usize, f64)> = None;
        for (candidate, &cost) in row.iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((candidate, cost)),
            }
        }
        let next = best.expect("unvisited candidate must exist while tour incomplete").0;
        visited[next] = true;
        genes.push(next);
    }

    Tour::new(genes)
}

/// A uniform random permutation with the fixed origin (if any) pinned at
/// position 0.
pub fn random_tour<R: Rng + ?Sized>(
    dimension: usize,
    fixed_origin: Option<usize>,
    rng: &mut R,
) -> Tour {
    let mut genes: Vec<usize> = (0..dimension).collect();
    match fixed_origin {
        Some(origin) => {
            let pos = genes.iter().position(|&g| g == origin).expect("origin in range");
            genes.swap(0, pos);
            genes[1..].shuffle(rng);
        }
        None => genes.shuffle(rng),
    }
    Tour::new(genes)
}
