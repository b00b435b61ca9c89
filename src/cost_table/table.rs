//! Dense N×N cost matrix indexed by (origin, destination).

use crate::error::{Error, Result};

/// A dense cost matrix stored row-major, the canonical input to the GA.
///
/// The table is immutable for the duration of a solve; callers build it
/// once (via [`crate::tsplib`] or [`crate::routing_client`]) and hand it to
/// the engine by reference.
///
/// # Examples
///
/// ```
/// use tsp_ga_core::cost_table::CostTable;
///
/// let mut table = CostTable::new(3);
/// table.set(0, 1, 4.0);
/// table.set(1, 0, 4.0);
/// assert_eq!(table.get(0, 1), 4.0);
/// assert_eq!(table.get(0, 0), 0.0);
/// assert_eq!(table.dimension(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CostTable {
    data: Vec<f64>,
    dimension: usize,
}

impl CostTable {
    /// Creates a zero-initialized N×N cost table.
    pub fn new(dimension: usize) -> Self {
        Self {
            data: vec![0.0; dimension * dimension],
            dimension,
        }
    }

    /// Builds a cost table from an explicit row-major N² buffer.
    ///
    /// Returns `Err` if `data.len() != dimension * dimension`, or if any
    /// diagonal entry is nonzero (the zero-diagonal invariant required of
    /// every well-formed table, §3).
    pub fn from_rows(dimension: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != dimension * dimension {
            return Err(Error::BadInput(format!(
                "cost table data length {} does not match dimension {} squared",
                data.len(),
                dimension
            )));
        }
        for i in 0..dimension {
            if data[i * dimension + i] != 0.0 {
                return Err(Error::BadInput(format!(
                    "cost table diagonal entry ({i}, {i}) must be zero"
                )));
            }
        }
        Ok(Self { data, dimension })
    }

    /// Cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.dimension + to]
    }

    /// Sets the cost of travelling from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.dimension + to] = cost;
    }

    /// Number of nodes covered by this table.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the row of costs from `from` to every other node, in index
    /// order. Used by the nearest-neighbor seeder to scan a tail's
    /// candidates without re-indexing per call.
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// `true` if every diagonal entry is zero, the invariant required of
    /// any well-formed table (§3, §8).
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.dimension).all(|i| self.get(i, i) == 0.0)
    }
}
