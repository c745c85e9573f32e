use crate::models::ListingRecord;
use crate::sources::traits::{decode_rows, ListingSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Listings exported as a JSON array, e.g. a snapshot of the marketplace feed
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        debug!("Reading listings from {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse listings in {}", self.path.display()))?;

        let total = rows.len();
        let listings = decode_rows(self.source_name(), rows);
        info!(
            "Loaded {} of {} listings from {}",
            listings.len(),
            total,
            self.path.display()
        );
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}
