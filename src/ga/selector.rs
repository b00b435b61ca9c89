//! Parent selection: random and roulette-wheel (spec §4.6).

use rand::Rng;

use crate::error::{Error, Result};

use super::evaluator::EvaluatedTour;

/// Selects one chromosome uniformly at random. Fails with `Internal` if
/// the population has fewer than 2 entries (spec §4.6, §7).
pub fn select_random<'a, R: Rng + ?Sized>(
    population: &'a [EvaluatedTour],
    rng: &mut R,
) -> Result<&'a EvaluatedTour> {
    if population.len() < 2 {
        return Err(Error::Internal(
            "random selection requires a population of at least 2".to_string(),
        ));
    }
    let index = rng.random_range(0..population.len());
    Ok(&population[index])
}

/// Selects two distinct chromosomes via roulette-wheel selection.
///
/// `T = sum(fitness)`; each draw picks `r = U(0, T)` and walks the
/// population in its current (stable, snapshotted) order, accumulating
/// fitness, returning the first chromosome whose running accumulator is
/// `>= r`. The second draw is resampled if it returns the same chromosome
/// as the first (by identity of index).
pub fn select_roulette_pair<'a, R: Rng + ?Sized>(
    population: &'a [EvaluatedTour],
    rng: &mut R,
) -> Result<(&'a EvaluatedTour, &'a EvaluatedTour)> {
    if population.len() < 2 {
        return Err(Error::Internal(
            "roulette selection requires a population of at least 2".to_string(),
        ));
    }

    let total: f64 = population.iter().map(|e| e.fitness).sum();
    let first_index = roulette_draw(population, total, rng);
    let mut second_index = roulette_draw(population, total, rng);

    let mut guard = 0;
    while second_index == first_index && guard < 64 {
        second_index = roulette_draw(population, total, rng);
        guard += 1;
    }

    Ok((&population[first_index], &population[second_index]))
}

fn roulette_draw<R: Rng + ?Sized>(population: &[EvaluatedTour], total: f64, rng: &mut R) -> usize {
    let target = rng.random_range(0.0..total);
    let mut accumulator = 0.0;
    for (index, entry) in population.iter().enumerate() {
        accumulator += entry.fitness;
        if accumulator >= target {
            return index;
        }
    }
    population.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Tour;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_population() -> Vec<EvaluatedTour> {
        vec![
            EvaluatedTour { tour: Tour::new(vec![0, 1, 2]), fitness: 1.0 },
            EvaluatedTour { tour: Tour::new(vec![0, 2, 1]), fitness: 2.0 },
            EvaluatedTour { tour: Tour::new(vec![1, 0, 2]), fitness: 3.0 },
        ]
    }

    #[test]
    fn random_selection_fails_below_two() {
        let population = vec![sample_population().remove(0)];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_random(&population, &mut rng).is_err());
    }

    #[test]
    fn random_selection_picks_a_member() {
        let population = sample_population();
        let mut rng = StdRng::seed_from_u64(2);
        let chosen = select_random(&population, &mut rng).unwrap();
        assert!(population.iter().any(|e| e.tour == chosen.tour));
    }

    #[test]
    fn roulette_pair_returns_distinct_members() {
        let population = sample_population();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (a, b) = select_roulette_pair(&population, &mut rng).unwrap();
            assert_ne!(a.tour, b.tour);
        }
    }

    #[test]
    fn roulette_pair_fails_below_two() {
        let population = vec![sample_population().remove(0)];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_roulette_pair(&population, &mut rng).is_err());
    }
}
