use geojson::FeatureCollection;
use nwi_core::summary::{parse_summary, parse_total_users};
use nwi_core::{topology, Dashboard, DashboardError, Suggestion, SummaryCollection};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::config::AppConfig;

pub const SUMMARY_PATH: &str = "api/summary";
pub const TOTAL_USERS_PATH: &str = "api/total_users";
pub const SUGGESTIONS_PATH: &str = "api/suggestions";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid endpoint {path}: {reason}")]
    Endpoint { path: String, reason: String },
}

/// Thin client over the dashboard backend and the boundary dataset
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    geometry_url: Option<Url>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            geometry_url: config.geometry_url.clone(),
        })
    }

    pub const fn map_enabled(&self) -> bool {
        self.geometry_url.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::Endpoint {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_text(&self, url: Url) -> Result<String, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.text().await?)
    }

    pub async fn fetch_summary(&self) -> Result<SummaryCollection, ApiError> {
        let body = self.get_text(self.endpoint(SUMMARY_PATH)?).await?;
        Ok(parse_summary(&body)?)
    }

    pub async fn fetch_total_users(&self) -> Result<u64, ApiError> {
        let body = self.get_text(self.endpoint(TOTAL_USERS_PATH)?).await?;
        Ok(parse_total_users(&body)?)
    }

    /// Issues both statistics requests at once; neither failure cancels the
    /// other. A summary failure is handed back alongside the defaults.
    pub async fn fetch_dashboard(&self) -> (Dashboard, Option<DashboardError>) {
        let (summary, total) = tokio::join!(self.fetch_summary(), self.fetch_total_users());

        let summary = summary.map_err(|e| DashboardError::fetch(SUMMARY_PATH, e));
        let total = total.map_err(|e| DashboardError::fetch(TOTAL_USERS_PATH, e));

        Dashboard::from_fetch(summary, total)
    }

    /// Fetches and decodes the boundary dataset. Antimeridian normalization
    /// is left to the caller.
    pub async fn fetch_geometry(&self) -> Result<FeatureCollection, DashboardError> {
        let Some(url) = self.geometry_url.clone() else {
            return Err(DashboardError::geometry("map disabled"));
        };

        let body = self
            .get_text(url)
            .await
            .map_err(DashboardError::geometry)?;
        Ok(topology::decode(&body)?)
    }

    pub async fn submit_suggestion(&self, suggestion: &Suggestion) -> Result<(), DashboardError> {
        let url = self
            .endpoint(SUGGESTIONS_PATH)
            .map_err(DashboardError::submission)?;

        let response = self
            .client
            .post(url)
            .json(suggestion)
            .send()
            .await
            .map_err(DashboardError::submission)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::submission(ApiError::Status(status)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&AppConfig {
            base_url: crate::config::parse_base_url(base).unwrap(),
            geometry_url: None,
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[test]
    fn endpoints_are_joined_onto_the_base() {
        let api = client("https://example.org/nwi");
        assert_eq!(
            api.endpoint(SUMMARY_PATH).unwrap().as_str(),
            "https://example.org/nwi/api/summary"
        );
        assert!(!api.map_enabled());
    }

    #[tokio::test]
    async fn unreachable_backend_degrades_to_defaults() {
        // Port 9 (discard) is not expected to serve HTTP.
        let api = client("http://127.0.0.1:9");
        let (dashboard, error) = api.fetch_dashboard().await;

        assert!(matches!(error, Some(DashboardError::Fetch { .. })));
        assert_eq!(dashboard, Dashboard::default());
    }

    #[tokio::test]
    async fn geometry_is_skipped_when_disabled() {
        let api = client("http://127.0.0.1:9");
        assert!(matches!(
            api.fetch_geometry().await,
            Err(DashboardError::GeometryLoad { .. })
        ));
    }
}
