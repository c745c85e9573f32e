use crate::models::ListingRecord;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Common trait for everything that can supply the listing collection.
/// The search engine only ever sees the records a source returns.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Load every listing available for browsing
    async fn fetch(&self) -> Result<Vec<ListingRecord>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}

/// Decode raw rows one at a time, skipping any that fail to deserialize or
/// break the catalog contract. Survivors keep their input order.
pub fn decode_rows(source: &str, rows: Vec<Value>) -> Vec<ListingRecord> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let listing = match serde_json::from_value::<ListingRecord>(row) {
                Ok(listing) => listing,
                Err(e) => {
                    warn!("{}: skipping row {}: {}", source, index, e);
                    return None;
                }
            };
            match listing.validate() {
                Ok(()) => Some(listing),
                Err(e) => {
                    warn!("{}: skipping listing: {}", source, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Farm plot near Karjat",
            "property_type": "Agricultural",
            "property_subtype": "Farm Plots",
            "total_cost": 3500000,
            "area_value": 2.5,
            "area_unit": "Acres",
            "locality": "Karjat",
            "city": "Raigad",
            "created_at": "2026-01-04T09:30:00+00:00"
        })
    }

    #[test]
    fn bad_row_does_not_sink_the_batch() {
        let mut broken = row("b");
        broken["created_at"] = Value::Null;
        let listings = decode_rows("test", vec![row("a"), broken, row("c")]);
        let ids: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn loose_backend_values_are_kept() {
        let mut fractional = row("b");
        fractional["total_cost"] = json!(3500000.5);
        let mut lowercase = row("c");
        lowercase["facing"] = json!("north");
        let mut blank = row("d");
        blank["facing"] = json!("");

        let listings = decode_rows("test", vec![row("a"), fractional, lowercase, blank]);
        assert_eq!(listings.len(), 4);
        assert_eq!(listings[1].price, 3_500_001);
        assert_eq!(listings[2].facing, None);
        assert_eq!(listings[3].facing, None);
    }
}
