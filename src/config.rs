use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Runtime settings, layered: defaults, then `estate-scout.toml`, then
/// `SCOUT_*` environment variables (a `.env` file is loaded first).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// JSON file used when no backend is configured
    pub listings_path: String,
    pub backend_url: Option<String>,
    pub backend_key: Option<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_sources(Some("estate-scout"))
    }

    fn from_sources(file: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("listings_path", "data/listings.json")?
            .set_default("request_timeout_secs", 30)?
            .set_default("log_level", "info")?;

        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("SCOUT"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let settings = Settings::from_sources(None).unwrap();
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(!settings.log_level.is_empty());
        assert!(!settings.listings_path.is_empty());
    }
}
