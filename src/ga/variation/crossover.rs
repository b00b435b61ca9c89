//! Position-based partial crossover (spec §4.7).

use rand::seq::index::sample;
use rand::Rng;

use crate::chromosome::Tour;
use crate::error::{Error, Result};

/// Produces a child pair from an ordered parent pair via position-based
/// partial crossover.
///
/// `L` distinct loci are chosen (excluding position 0 when `fixed_origin`
/// is set); each child starts as a copy of its like-indexed parent, the
/// gene at each locus from the *other* parent is deleted from the child
/// (leaving a hole), then loci are replayed in ascending order, filling
/// the first remaining hole in each child with the other parent's locus
/// gene. This preserves permutation validity and never selects position 0
/// as a locus, so the fixed origin survives untouched.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &Tour,
    parent_b: &Tour,
    fixed_origin: Option<usize>,
    rng: &mut R,
) -> Result<(Tour, Tour)> {
    let n = parent_a.len();
    let low = if fixed_origin.is_some() { 1 } else { 0 };
    let eligible = n - low;

    let loci_count = rng.random_range(1..=eligible.max(1));
    let mut loci: Vec<usize> = sample(rng, eligible, loci_count)
        .iter()
        .map(|offset| offset + low)
        .collect();
    loci.sort_unstable();

    let mut child_a: Vec<Option<usize>> = parent_a.genes().iter().map(|&g| Some(g)).collect();
    let mut child_b: Vec<Option<usize>> = parent_b.genes().iter().map(|&g| Some(g)).collect();

    for &locus in &loci {
        let gene_from_b = parent_b.genes()[locus];
        punch_hole(&mut child_a, gene_from_b)?;
        let gene_from_a = parent_a.genes()[locus];
        punch_hole(&mut child_b, gene_from_a)?;
    }

    for &locus in &loci {
        let gene_from_b = parent_b.genes()[locus];
        fill_first_hole(&mut child_a, gene_from_b)?;
        let gene_from_a = parent_a.genes()[locus];
        fill_first_hole(&mut child_b, gene_from_a)?;
    }

    let genes_a = unwrap_all(child_a)?;
    let genes_b = unwrap_all(child_b)?;

    debug_assert_eq!(genes_a.len(), n);
    debug_assert_eq!(genes_b.len(), n);

    Ok((Tour::new(genes_a), Tour::new(genes_b)))
}

fn punch_hole(child: &mut [Option<usize>], value: usize) -> Result<()> {
    match child.iter().position(|g| *g == Some(value)) {
        Some(pos) => {
            child[pos] = None;
            Ok(())
        }
        None => Err(Error::Internal(format!(
            "crossover could not locate gene {value} to punch a hole"
        ))),
    }
}

fn fill_first_hole(child: &mut [Option<usize>], value: usize) -> Result<()> {
    match child.iter().position(|g| g.is_none()) {
        Some(pos) => {
            child[pos] = Some(value);
            Ok(())
        }
        None => Err(Error::Internal(
            "crossover hole-count mismatch: no remaining hole to fill".to_string(),
        )),
    }
}

fn unwrap_all(child: Vec<Option<usize>>) -> Result<Vec<usize>> {
    child
        .into_iter()
        .map(|g| g.ok_or_else(|| Error::Internal("crossover left an unfilled hole".to_string())))
        .collect()
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
    fn crossover_preserves_permutation_validity() {
        let mut rng = StdRng::seed_from_u64(17);
        let a = Tour::new(vec![0, 1, 2, 3, 4]);
        let b = Tour::new(vec![4, 3, 2, 1, 0]);
        for _ in 0..200 {
            let (child_a, child_b) = crossover(&a, &b, None, &mut rng).unwrap();
            assert_eq!(sorted(&child_a), vec![0, 1, 2, 3, 4]);
            assert_eq!(sorted(&child_b), vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn crossover_never_selects_position_zero_as_locus_with_fixed_origin() {
        let mut rng = StdRng::seed_from_u64(23);
        let a = Tour::new(vec![2, 0, 1, 3, 4]);
        let b = Tour::new(vec![2, 4, 3, 1, 0]);
        for _ in 0..1000 {
            let (child_a, child_b) = crossover(&a, &b, Some(2), &mut rng).unwrap();
            assert_eq!(child_a.genes()[0], 2);
            assert_eq!(child_b.genes()[0], 2);
            assert_eq!(sorted(&child_a), vec![0, 1, 2, 3, 4]);
            assert_eq!(sorted(&child_b), vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn crossover_smallest_case_three_nodes() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = Tour::new(vec![0, 1, 2]);
        let b = Tour::new(vec![0, 2, 1]);
        let (child_a, child_b) = crossover(&a, &b, Some(0), &mut rng).unwrap();
        assert_eq!(sorted(&child_a), vec![0, 1, 2]);
        assert_eq!(sorted(&child_b), vec![0, 1, 2]);
    }
}
