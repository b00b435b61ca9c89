//! GA configuration (spec §3).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Solver configuration for one GA run.
///
/// Construct with [`GAConfig::new`] and adjust with the `with_*` builder
/// methods, following the teacher crate's `GaConfig::default().with_*(..)`
/// idiom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GAConfig {
    /// Number of nodes, 3..=100.
    pub dimension: usize,
    /// Node index fixed at position 0 of every tour, modelling a depot.
    pub fixed_origin_index: Option<usize>,
    /// Whether the tour cost includes the last-to-first edge.
    pub return_to_origin: bool,
    /// Target population size (capped to the permutation-space size).
    pub population_size: usize,
    /// Percentage of the population seeded via nearest-neighbor tours.
    pub nna_percentage: u32,
    /// Hard generation cap.
    pub max_generations: u32,
    /// Generations since the best cost improved before giving up.
    pub max_chromosome_age: u32,
    /// Percentage of the population mutated each generation.
    pub mutation_rate_percent: u32,
    /// Number of top chromosomes preserved across generations.
    pub elite_count: usize,
}

impl GAConfig {
    /// Creates a config for the given dimension, with every other field at
    /// its spec-§3 default.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    pub fn with_fixed_origin_index(mut self, index: usize) -> Self {
        self.fixed_origin_index = Some(index);
        self
    }

    pub fn with_return_to_origin(mut self, value: bool) -> Self {
        self.return_to_origin = value;
        self
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_nna_percentage(mut self, percentage: u32) -> Self {
        self.nna_percentage = percentage;
        self
    }

    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_max_chromosome_age(mut self, age: u32) -> Self {
        self.max_chromosome_age = age;
        self
    }

    pub fn with_mutation_rate_percent(mut self, rate: u32) -> Self {
        self.mutation_rate_percent = rate;
        self
    }

    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Size of the full permutation space for this config: `(N-1)!` when
    /// the origin is fixed (position 0 is pinned), else `N!`.
    pub fn permutation_space_size(&self) -> u128 {
        let free_positions = if self.fixed_origin_index.is_some() {
            self.dimension.saturating_sub(1)
        } else {
            self.dimension
        };
        factorial(free_positions)
    }

    /// Effective population size: the configured size, capped at the full
    /// permutation space when that space is smaller (spec §3).
    pub fn effective_population_size(&self) -> usize {
        let space = self.permutation_space_size();
        if (self.population_size as u128) > space {
            space as usize
        } else {
            self.population_size
        }
    }

    /// `true` when the initial population already enumerates the whole
    /// permutation space (spec §4.9 "problem is small").
    pub fn is_small_problem(&self) -> bool {
        self.permutation_space_size() <= self.population_size as u128
    }

    /// Validates dimension and fixed-origin bounds (spec §7 BadInput).
    pub fn validate(&self) -> Result<()> {
        if !(3..=100).contains(&self.dimension) {
            return Err(Error::BadInput(format!(
                "dimension {} out of range [3, 100]",
                self.dimension
            )));
        }
        if let Some(origin) = self.fixed_origin_index {
            if origin >= self.dimension {
                return Err(Error::BadInput(format!(
                    "fixed origin index {} out of range for dimension {}",
                    origin, self.dimension
                )));
            }
        }
        Ok(())
    }
}

impl Default for GAConfig {
    fn default() -> Self {
        Self {
            dimension: 3,
            fixed_origin_index: None,
            return_to_origin: true,
            population_size: 100,
            nna_percentage: 40,
            max_generations: 1000,
            max_chromosome_age: 250,
            mutation_rate_percent: 2,
            elite_count: 2,
        }
    }
}

fn factorial(n: usize) -> u128 {
    (1..=n as u128).product::<u128>().max(1)
}
