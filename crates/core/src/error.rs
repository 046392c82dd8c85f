use thiserror::Error;

use crate::topology::TopologyError;

/// Failures surfaced by the dashboard. Lookup misses are not errors; they
/// resolve to the unknown region instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Network or decode failure on one of the statistics endpoints.
    #[error("Failed to fetch {endpoint}: {reason}")]
    Fetch { endpoint: String, reason: String },

    /// The suggestion endpoint rejected the submission or could not be reached.
    #[error("Failed to submit suggestion: {reason}")]
    Submission { reason: String },

    #[error("Suggestion text is required")]
    EmptySuggestion,

    /// The boundary dataset could not be fetched or decoded.
    #[error("Failed to load map geometry: {reason}")]
    GeometryLoad { reason: String },
}

impl DashboardError {
    pub fn fetch(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn submission(reason: impl ToString) -> Self {
        Self::Submission {
            reason: reason.to_string(),
        }
    }

    pub fn geometry(reason: impl ToString) -> Self {
        Self::GeometryLoad {
            reason: reason.to_string(),
        }
    }
}

impl From<TopologyError> for DashboardError {
    fn from(error: TopologyError) -> Self {
        Self::geometry(error)
    }
}
