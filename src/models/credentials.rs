//! Routing-provider credentials (spec §4.2, §6).
//!
//! Resolving an `apiName` to an actual key is a configuration-loading
//! concern (out of scope, see SPEC_FULL.md Non-goals); this crate only
//! needs the resolved value threaded through to [`crate::routing_client`].

use serde::{Deserialize, Serialize};

/// Credentials for a single routing-provider request session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingCredentials {
    pub api_key: String,
    pub vehicle_type: String,
}

impl RoutingCredentials {
    pub fn new(api_key: impl Into<String>, vehicle_type: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            vehicle_type: vehicle_type.into(),
        }
    }
}
