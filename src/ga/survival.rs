//! Next-generation composition with elite preservation (spec §4.8).

use super::evaluator::EvaluatedTour;

/// Replaces the bottom `elite_count` entries of `new_generation` with the
/// top `elite_count` entries of `previous_generation`, both sorted
/// ascending by fitness.
///
/// The source's survival step spliced in `elite_count + 1` previous-best
/// entries via a `slice(0, E+1)` call; spec §9 normalizes this to exactly
/// `elite_count` so population size is preserved exactly (see DESIGN.md).
pub fn survive(
    mut previous_generation: Vec<EvaluatedTour>,
    mut new_generation: Vec<EvaluatedTour>,
    elite_count: usize,
) -> Vec<EvaluatedTour> {
    sort_ascending_by_fitness(&mut previous_generation);
    sort_ascending_by_fitness(&mut new_generation);

    let elite_count = elite_count
        .min(previous_generation.len())
        .min(new_generation.len());

    let elite = previous_generation.split_off(previous_generation.len() - elite_count);
    let keep_len = new_generation.len() - elite_count;
    new_generation.truncate(keep_len);
    new_generation.extend(elite);

    new_generation
}

fn sort_ascending_by_fitness(population: &mut [EvaluatedTour]) {
    population.sort_by(|a, b| {
        a.fitness
            .partial_cmp(&b.fitness)
            .expect("fitness values must be comparable")
    });
}
