//! Problem descriptor: the boundary input from an HTTP collaborator (spec §6).

use serde::{Deserialize, Serialize};

/// The problem family. ATSP is accepted at the boundary but has no
/// dedicated code path — asymmetric costs are handled transparently by
/// [`crate::cost_table::CostTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemType {
    #[serde(rename = "TSP")]
    Tsp,
    #[serde(rename = "ATSP")]
    Atsp,
}

/// The edge-weight convention named by the boundary descriptor.
///
/// Only [`EdgeWeightType::Euc2d`] is handled by [`crate::tsplib`]; a real
/// instance always routes to [`crate::routing_client`] regardless of this
/// field (see SPEC_FULL.md "GEO path for real instances").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeWeightType {
    #[serde(rename = "GEO")]
    Geo,
    #[serde(rename = "EUC_2D")]
    Euc2d,
    #[serde(rename = "EXPLICIT")]
    Explicit,
}

/// Where a problem's coordinates/costs come from.
///
/// The boundary descriptor carries this as a single `isRealInstance`
/// boolean with discriminated extra fields (spec §6); `#[serde(untagged)]`
/// dispatches on which field set is present, matching that shape without
/// needing a string tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstanceSource {
    /// Real instance: coordinates and costs come from a routing provider.
    Real {
        api_name: String,
        coordinates_path: String,
    },
    /// Synthetic instance: coordinates come from a static TSPLIB file.
    Synthetic {
        instance_name: String,
        best_known_cost: Option<f64>,
    },
}

impl InstanceSource {
    /// The `isRealInstance` flag named in spec §6.
    pub fn is_real_instance(&self) -> bool {
        matches!(self, InstanceSource::Real { .. })
    }
}

/// The problem descriptor an HTTP collaborator hands the solver (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub problem_type: ProblemType,
    pub edge_weight_type: EdgeWeightType,
    pub dimension: usize,
    /// Solver tag; currently only `"GA"` is supported.
    pub algorithm: String,
    pub source: InstanceSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_problem_round_trips_through_json() {
        let problem = Problem {
            problem_type: ProblemType::Tsp,
            edge_weight_type: EdgeWeightType::Euc2d,
            dimension: 10,
            algorithm: "GA".to_string(),
            source: InstanceSource::Synthetic {
                instance_name: "berlin10".to_string(),
                best_known_cost: Some(1234.0),
            },
        };
        let json = serde_json::to_string(&problem).unwrap();
        let back: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dimension, 10);
        assert!(matches!(back.source, InstanceSource::Synthetic { .. }));
    }

    #[test]
    fn real_problem_round_trips_through_json() {
        let problem = Problem {
            problem_type: ProblemType::Tsp,
            edge_weight_type: EdgeWeightType::Geo,
            dimension: 5,
            algorithm: "GA".to_string(),
            source: InstanceSource::Real {
                api_name: "neshan".to_string(),
                coordinates_path: "coords.txt".to_string(),
            },
        };
        let json = serde_json::to_string(&problem).unwrap();
        let back: Problem = serde_json::from_str(&json).unwrap();
        assert!(matches!(back.source, InstanceSource::Real { .. }));
    }
}
