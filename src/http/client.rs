use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::config::ApiSettings;
use crate::domain::ReportRecord;

/// Read-only client for the reports API
pub struct ReportsClient {
    client: Client,
    base_url: String,
}

impl ReportsClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = Self::build_client(settings.user_agent, settings.timeout_secs)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the whole collection in one round-trip
    pub async fn fetch_reports(&self) -> Result<Vec<ReportRecord>> {
        let url = format!("{}/api/reports", self.base_url);
        let response = self.send_get_request(&url).await?;

        response
            .error_for_status()
            .with_context(|| format!("Reports API returned an error status: {}", url))?
            .json::<Vec<ReportRecord>>()
            .await
            .context("Failed to decode reports from API")
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))
    }
}
