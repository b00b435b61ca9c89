//! Concurrent routing-provider cost-table construction (spec §4.2, §5, §6).

mod client;
mod provider;

pub use client::RoutingClient;
pub use provider::RoutingProvider;
