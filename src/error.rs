//! Error types for the solver core.
//!
//! Errors carry a kind (matching an HTTP-style severity) and a human
//! message. The crate never decides how a kind maps onto an actual HTTP
//! response — that's the embedding service's job — but exposes `status()`
//! so it can.

use thiserror::Error;

/// A core error, tagged with the kind from spec §7.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid coordinates, unsupported problem/edge-weight type, missing
    /// or malformed configs, dimension out of range.
    #[error("{0}")]
    BadInput(String),

    /// Coordinate file empty or unreadable; instance file not found.
    #[error("{0}")]
    MissingResource(String),

    /// Routing provider returned a non-2xx status or malformed JSON.
    #[error("{0}")]
    UpstreamFailure(String),

    /// Invariant violation: selection on a too-small population, mutation
    /// producing the wrong gene count, crossover hole-count mismatch,
    /// unsupported algorithm tag.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// HTTP-style severity for the error kind, for an outer layer to map
    /// onto an actual status code.
    pub fn status(&self) -> u16 {
        match self {
            Error::BadInput(_) => 400,
            Error::MissingResource(_) => 400,
            Error::UpstreamFailure(_) => 500,
            Error::Internal(_) => 500,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::MissingResource(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::UpstreamFailure(err.to_string())
    }
}

/// Convenience result type for the solver core.
pub type Result<T> = std::result::Result<T, Error>;
