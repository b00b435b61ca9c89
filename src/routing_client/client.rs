//! HTTP fan-out that builds a [`CostTable`] from a routing provider.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::cost_table::CostTable;
use crate::error::{Error, Result};
use crate::models::Coordinate;

use super::provider::RoutingProvider;

/// Default bound on concurrent in-flight requests (spec §5: "a semaphore
/// of 32-128").
const DEFAULT_CONCURRENCY: usize = 64;

/// Fetches pairwise durations from an external routing provider and
/// assembles them into a dense [`CostTable`] (spec §4.2).
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    provider: RoutingProvider,
    api_key: String,
    vehicle_type: String,
    base_url: String,
    concurrency: usize,
}

impl RoutingClient {
    /// Creates a client for the given provider. `api_key` may be empty —
    /// that is only rejected once a build is actually attempted, matching
    /// the "missing credentials" failure mode in §4.2.
    pub fn new(provider: RoutingProvider, api_key: impl Into<String>, vehicle_type: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: provider.default_base_url().to_string(),
            provider,
            api_key: api_key.into(),
            vehicle_type: vehicle_type.into(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Overrides the provider's default base URL (used by tests to target
    /// a local stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the concurrency bound on in-flight requests.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Builds an N×N cost table whose off-diagonal (i, j) entries are the
    /// provider's reported duration for travelling from coordinate i to
    /// coordinate j. All off-diagonal requests are dispatched concurrently
    /// and awaited collectively; the first failure cancels the rest and
    /// fails the whole construction (spec §4.2, §5).
    pub async fn build_cost_table(&self, coordinates: &[String]) -> Result<CostTable> {
        if self.api_key.is_empty() {
            return Err(Error::BadInput("API key missing".to_string()));
        }

        let n = coordinates.len();
        let parsed: Vec<Coordinate> = coordinates
            .iter()
            .map(|c| Coordinate::parse_latlong(c))
            .collect::<Result<_>>()?;

        debug!(dimension = n, provider = ?self.provider, "building routing cost table");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<Result<(usize, usize, f64)>> = JoinSet::new();

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let http = self.http.clone();
                let semaphore = Arc::clone(&semaphore);
                let origin = parsed[i].to_latlong();
                let destination = parsed[j].to_latlong();
                let url = self.base_url.clone();
                let api_key = self.api_key.clone();
                let vehicle_type = self.vehicle_type.clone();

                tasks.spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| Error::Internal("routing semaphore closed".to_string()))?;
                    let duration = fetch_duration(&http, &url, &api_key, &vehicle_type, &origin, &destination).await?;
                    Ok((i, j, duration))
                });
            }
        }

        let mut results = Vec::with_capacity(n.saturating_sub(1) * n);
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| Error::UpstreamFailure(format!("routing task panicked: {e}")))?;
            match outcome {
                Ok(triple) => results.push(triple),
                Err(err) => {
                    warn!(error = %err, "routing fetch failed, cancelling outstanding requests");
                    tasks.abort_all();
                    return Err(err);
                }
            }
        }

        // Sort lexicographically by (origin, destination) so consumers may
        // assume contiguous row layout (spec §4.2).
        results.sort_by_key(|&(origin, destination, _)| (origin, destination));

        let mut table = CostTable::new(n);
        for (origin, destination, duration) in results {
            table.set(origin, destination, duration);
        }
        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionResponse {
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    duration: Metric,
}

#[derive(Debug, Deserialize)]
struct Metric {
    value: f64,
}

async fn fetch_duration(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    vehicle_type: &str,
    origin: &str,
    destination: &str,
) -> Result<f64> {
    let response = http
        .get(base_url)
        .query(&[
            ("type", vehicle_type),
            ("origin", origin),
            ("destination", destination),
        ])
        .header("Api-Key", api_key)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::UpstreamFailure("fetching routing data failed".to_string()));
    }

    let parsed: DirectionResponse = response
        .json()
        .await
        .map_err(|_| Error::UpstreamFailure("fetching routing data failed".to_string()))?;

    parsed
        .routes
        .first()
        .and_then(|route| route.legs.first())
        .map(|leg| leg.duration.value)
        .ok_or_else(|| Error::UpstreamFailure("fetching routing data failed".to_string()))
}
