//! # tsp-ga-core
//!
//! Genetic-algorithm TSP solver core: a population-based GA over tour
//! permutations with fixed-origin support, plus the cost-table
//! construction pipeline that feeds it — either a static TSPLIB `EUC_2D`
//! parse or concurrent calls to an external routing provider.
//!
//! ## Modules
//!
//! - [`models`] — boundary value types: `Problem`, `GAConfig`, `SolvedProblem`
//! - [`cost_table`] — the dense N×N cost matrix every solve operates over
//! - [`tsplib`] — static TSPLIB `EUC_2D` instance parsing
//! - [`routing_client`] — concurrent cost-table construction from a routing API
//! - [`chromosome`] — the tour permutation type
//! - [`ga`] — seeding, evaluation, selection, variation, survival, and the engine loop
//! - [`error`] — the core's error type and HTTP-style severity mapping
//!
//! HTTP routing, request/response serialization, persistence, authentication,
//! and configuration *loading* are all external collaborators' jobs; this
//! crate exposes a single boundary operation, [`solve`].

pub mod chromosome;
pub mod cost_table;
pub mod error;
pub mod ga;
pub mod models;
pub mod routing_client;
pub mod tsplib;

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use cost_table::CostTable;
use error::{Error, Result};
use ga::CancellationToken;
use models::{GAConfig, InstanceSource, Problem, RoutingCredentials, SolvedProblem};

/// Directory under which synthetic TSPLIB instance files are looked up by
/// `instanceName`, relative to the process's working directory.
pub const STATIC_INSTANCES_DIR: &str = "instances";

/// Resolves a [`Problem`] to a [`CostTable`] and runs the GA to termination.
///
/// This is the sole boundary operation an HTTP collaborator calls. It
/// internally dispatches on `problem.source`:
///
/// - [`InstanceSource::Synthetic`] reads `{STATIC_INSTANCES_DIR}/{instance_name}.tsp`
///   and parses it as TSPLIB `EUC_2D`.
/// - [`InstanceSource::Real`] reads the coordinates file at `coordinates_path`
///   (one `"lat,long"` line per node) and fetches durations from the routing
///   provider named by `api_name`, using `credentials` (a missing or empty
///   `api_key` fails fast with `BadInput("API key missing")`).
///
/// `seed` determines the RNG stream; omit it for a fresh OS-seeded run.
/// `cancel`, if given, is checked at generation boundaries only.
pub fn solve(
    problem: &Problem,
    config: &GAConfig,
    credentials: Option<&RoutingCredentials>,
    seed: Option<u64>,
    cancel: Option<&CancellationToken>,
) -> Result<SolvedProblem> {
    check_algorithm_tag(problem)?;
    let cost_table = resolve_cost_table(problem, credentials, Path::new(STATIC_INSTANCES_DIR))?;
    check_dimension_match(&cost_table, config)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    ga::solve(&cost_table, config, &mut rng, cancel)
}

/// Fails with `Internal` when `problem.algorithm` names a solver other than
/// the one this crate implements (spec §7's "unsupported algorithm tag").
fn check_algorithm_tag(problem: &Problem) -> Result<()> {
    if problem.algorithm != "GA" {
        return Err(Error::Internal("unsupported algorithm tag".to_string()));
    }
    Ok(())
}

/// Fails with `BadInput` when a resolved cost table's dimension disagrees
/// with the configured GA dimension (a mismatched `Problem`/`GAConfig` pair).
fn check_dimension_match(cost_table: &CostTable, config: &GAConfig) -> Result<()> {
    if cost_table.dimension() != config.dimension {
        return Err(Error::BadInput(format!(
            "cost table dimension {} does not match config dimension {}",
            cost_table.dimension(),
            config.dimension
        )));
    }
    Ok(())
}

/// Resolves a [`Problem`] to its [`CostTable`], looking synthetic instances
/// up under `instances_dir`. Split out from [`solve`] so tests can point it
/// at a scratch directory without touching the process's working directory.
fn resolve_cost_table(
    problem: &Problem,
    credentials: Option<&RoutingCredentials>,
    instances_dir: &Path,
) -> Result<CostTable> {
    match &problem.source {
        InstanceSource::Synthetic { instance_name, .. } => {
            let path: PathBuf = instances_dir.join(format!("{instance_name}.tsp"));
            let instance = tsplib::parse_file(&path)?;
            Ok(instance.cost_table())
        }
        InstanceSource::Real {
            api_name,
            coordinates_path,
        } => {
            let provider = routing_client::RoutingProvider::from_name(api_name)?;
            let raw = std::fs::read_to_string(coordinates_path)?;
            let coordinates: Vec<String> = raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            let (api_key, vehicle_type) = match credentials {
                Some(credentials) => (credentials.api_key.clone(), credentials.vehicle_type.clone()),
                None => (String::new(), String::new()),
            };
            let client = routing_client::RoutingClient::new(provider, api_key, vehicle_type);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(Error::from)?;
            runtime.block_on(client.build_cost_table(&coordinates))
        }
    }
}
