//! The closed set of supported routing providers (spec §4.2).

use crate::error::{Error, Result};

/// A routing provider, selected by name from a finite, closed set. Adding a
/// provider is a code change, per spec §4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingProvider {
    Neshan,
}

impl RoutingProvider {
    /// Resolves a provider by its boundary `apiName` string.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "neshan" => Ok(RoutingProvider::Neshan),
            other => Err(Error::BadInput(format!(
                "unsupported API: {other}"
            ))),
        }
    }

    /// The default base URL for this provider's direction-matrix endpoint.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            RoutingProvider::Neshan => "https://api.neshan.org/v4/direction",
        }
    }
}
