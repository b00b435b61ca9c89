//! Inversion-plus-displacement mutation (spec §4.7).

use rand::Rng;

use crate::chromosome::Tour;

/// Mutates one tour: reverses a random sub-sequence, then removes and
/// reinserts that reversed block at a random displacement position.
///
/// Positions are drawn from `[1, N)` when `fixed_origin` is set (position
/// 0 is never touched), else from `[0, N)`. The displacement may land the
/// block back where it started, producing a no-op mutation; this is
/// tolerated per spec §9 (open question) rather than asserted against.
pub fn mutate<R: Rng + ?Sized>(tour: &Tour, fixed_origin: Option<usize>, rng: &mut R) -> Tour {
    let mut genes = tour.genes().to_vec();
    let n = genes.len();
    let low = if fixed_origin.is_some() { 1 } else { 0 };

    let a = rng.random_range(low..n);
    let mut b = rng.random_range(low..n);
    while b == a && n - low > 1 {
        b = rng.random_range(low..n);
    }
    let (a, b) = if a <= b { (a, b) } else { (b, a) };

    genes[a..=b].reverse();
    let block: Vec<usize> = genes.drain(a..=b).collect();

    let remaining_len = genes.len();
    let insert_low = if fixed_origin.is_some() { 1 } else { 0 };
    let insert_pos = rng.random_range(insert_low..=remaining_len);
    for (offset, gene) in block.into_iter().enumerate() {
        genes.insert(insert_pos + offset, gene);
    }

    debug_assert_eq!(genes.len(), n, "mutation must preserve chromosome length");
    debug_assert!(
        {
            let mut sorted = genes.clone();
            sorted.sort_unstable();
            let mut original = tour.genes().to_vec();
            original.sort_unstable();
            sorted == original
        },
        "mutation must preserve the gene multiset"
    );

    Tour::new(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(tour: &Tour) -> Vec<usize> {
        let mut genes = tour.genes().to_vec();
        genes.sort_unstable();
        genes
    }

    #[test]
    fn mutation_preserves_gene_multiset() {
        let mut rng = StdRng::seed_from_u64(9);
        let tour = Tour::new(vec![0, 1, 2, 3, 4]);
        for _ in 0..200 {
            let mutated = mutate(&tour, None, &mut rng);
            assert_eq!(sorted(&mutated), sorted(&tour));
        }
    }

    #[test]
    fn mutation_never_touches_fixed_origin_position() {
        let mut rng = StdRng::seed_from_u64(123);
        let tour = Tour::new(vec![2, 0, 1, 3, 4]);
        for _ in 0..1000 {
            let mutated = mutate(&tour, Some(2), &mut rng);
            assert_eq!(mutated.genes()[0], 2);
            assert_eq!(sorted(&mutated), sorted(&tour));
        }
    }

    #[test]
    fn mutation_preserves_length() {
        let mut rng = StdRng::seed_from_u64(5);
        let tour = Tour::new(vec![0, 1, 2]);
        let mutated = mutate(&tour, None, &mut rng);
        assert_eq!(mutated.len(), tour.len());
    }
}
