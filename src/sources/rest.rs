use crate::models::ListingRecord;
use crate::sources::traits::{decode_rows, ListingSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The hosted backend's REST endpoint for the `properties` table
pub struct RestSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestSource {
    /// Create a source with the default 30 second request timeout
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("estate-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Active listings, newest first, with every column selected
    pub fn listings_url(&self) -> String {
        format!(
            "{}/rest/v1/properties?select=*&status=eq.Active&order=created_at.desc",
            self.base_url
        )
    }
}

#[async_trait]
impl ListingSource for RestSource {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        let url = self.listings_url();
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to fetch listings")?;

        if !response.status().is_success() {
            warn!("Backend returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Failed to decode listings response")?;

        let total = rows.len();
        let listings = decode_rows(self.source_name(), rows);
        info!("Fetched {} of {} listings from backend", listings.len(), total);
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_listing_url_without_double_slash() {
        let source = RestSource::new("https://abc.example.co/", "anon").unwrap();
        assert_eq!(
            source.listings_url(),
            "https://abc.example.co/rest/v1/properties?select=*&status=eq.Active&order=created_at.desc"
        );
        assert_eq!(source.source_name(), "rest");
    }
}
