//! Wire types for the statistics endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One day's roll-up as served by `/api/summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    #[serde(default)]
    pub unique_users: u64,
    #[serde(default)]
    pub countries: BTreeMap<String, u64>,
}

/// All days keyed by `YYYY-MM-DD`. The fixed-width format makes the map's
/// lexicographic order chronological.
pub type SummaryCollection = BTreeMap<String, DailySummary>;

/// Body of `/api/total_users`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalUsers {
    #[serde(default)]
    pub total_users: u64,
}

pub fn parse_summary(body: &str) -> serde_json::Result<SummaryCollection> {
    serde_json::from_str(body)
}

pub fn parse_total_users(body: &str) -> serde_json::Result<u64> {
    serde_json::from_str::<TotalUsers>(body).map(|total| total.total_users)
}
