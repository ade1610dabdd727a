//! Typed errors for the recommendation request.

use thiserror::Error;

pub const GENERIC_SERVICE_ERROR: &str = "Failed to fetch recommendations";

/// Errors that can occur while fetching recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The request never produced a response (DNS, connection refused, timeout...)
    #[error("Could not reach the recommendation service: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("{0}")]
    Service(String),

    /// Success status, but the payload does not carry a `songs` array
    #[error("Invalid response format")]
    MalformedResponse,
}

impl RecommendError {
    /// Stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::Transport(_) => "transport",
            RecommendError::Service(_) => "service",
            RecommendError::MalformedResponse => "malformed_response",
        }
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(e: reqwest::Error) -> Self {
        RecommendError::Transport(e.to_string())
    }
}
