use super::params::{FilterKey, FilterParams};
use crate::models::ListingRecord;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Result ordering offered by the sort selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Keep the order the listings were supplied in
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Relevance,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::Newest => "newest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "Relevance",
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
            SortOrder::Newest => "Newest First",
        }
    }

    /// Sort order carried by `params`; missing or unrecognised means relevance
    pub fn from_params(params: &FilterParams) -> Self {
        params
            .get(FilterKey::Sort)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Relative order of two listings; relevance treats every pair as equal
    pub fn compare(&self, a: &ListingRecord, b: &ListingRecord) -> Ordering {
        match self {
            SortOrder::Relevance => Ordering::Equal,
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::Newest => b.posted_at.cmp(&a.posted_at),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = crate::error::ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| crate::error::ParseValueError::new("sort order", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sort_from_params() {
        let params = FilterParams::from_query_string("sort=price_desc");
        assert_eq!(SortOrder::from_params(&params), SortOrder::PriceDesc);

        let params = FilterParams::from_query_string("sort=cheapest");
        assert_eq!(SortOrder::from_params(&params), SortOrder::Relevance);
        assert_eq!(SortOrder::from_params(&FilterParams::new()), SortOrder::Relevance);
    }

    #[test]
    fn set_sort_round_trips() {
        let mut params = FilterParams::new();
        for order in SortOrder::ALL {
            params.set_sort(order);
            assert_eq!(SortOrder::from_params(&params), order);
        }
        params.set_sort(SortOrder::Relevance);
        assert_eq!(params.get(FilterKey::Sort), None);
    }
}
