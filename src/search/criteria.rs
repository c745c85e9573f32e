use super::params::{FilterKey, FilterParams};
use crate::models::{AreaUnit, Category, Facing, ListingRecord, PropertyCondition, ServiceTag};
use std::str::FromStr;
use tracing::debug;

/// Selector value for bed/bath/balcony/parking counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountFilter {
    Exactly(u32),
    /// The "5+" selector
    AtLeast(u32),
}

impl CountFilter {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "5+" {
            return Some(CountFilter::AtLeast(5));
        }
        raw.parse().ok().map(CountFilter::Exactly)
    }

    pub fn matches(&self, count: u32) -> bool {
        match *self {
            CountFilter::Exactly(n) => count == n,
            CountFilter::AtLeast(n) => count >= n,
        }
    }
}

/// Typed view of a [`FilterParams`], parsed once per search.
///
/// Values that fail to parse leave their dimension unset, so a bad URL
/// narrows nothing rather than failing the search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub subtype: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub area_unit: Option<AreaUnit>,
    pub beds: Option<CountFilter>,
    pub baths: Option<CountFilter>,
    pub balconies: Option<CountFilter>,
    pub parking: Option<CountFilter>,
    pub facing: Option<Facing>,
    pub condition: Option<PropertyCondition>,
    pub amenities: Vec<String>,
    pub require_validation: bool,
}

impl SearchCriteria {
    pub fn from_params(params: &FilterParams) -> Self {
        let text = params
            .get(FilterKey::Query)
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let mut require_validation = false;
        for raw in params.get_all(FilterKey::Service) {
            match raw.parse::<ServiceTag>() {
                Ok(ServiceTag::Validation) => require_validation = true,
                // No listing attribute backs these yet
                Ok(tag) => debug!("Service filter {} has no listing attribute, skipping", tag),
                Err(e) => debug!("Ignoring service filter: {}", e),
            }
        }

        Self {
            text,
            category: parse_enum(params, FilterKey::Type),
            subtype: parse_with(params, FilterKey::SubType, |s| {
                (s != "5+").then(|| s.to_string())
            }),
            min_price: parse_with(params, FilterKey::MinPrice, parse_price),
            max_price: parse_with(params, FilterKey::MaxPrice, parse_price),
            area_unit: parse_enum(params, FilterKey::AreaUnit),
            beds: parse_with(params, FilterKey::Beds, CountFilter::parse),
            baths: parse_with(params, FilterKey::Baths, CountFilter::parse),
            balconies: parse_with(params, FilterKey::Balconies, CountFilter::parse),
            parking: parse_with(params, FilterKey::Parking, CountFilter::parse),
            facing: parse_enum(params, FilterKey::Facing),
            condition: parse_enum(params, FilterKey::Condition),
            amenities: params
                .get_all(FilterKey::Amenity)
                .into_iter()
                .map(str::to_string)
                .collect(),
            require_validation,
        }
    }

    /// True when no dimension would reject anything
    pub fn is_unrestricted(&self) -> bool {
        *self == SearchCriteria::default()
    }

    /// Whether `listing` passes every active filter
    pub fn matches(&self, listing: &ListingRecord) -> bool {
        if let Some(text) = &self.text {
            let hit = [&listing.location, &listing.title, &listing.city]
                .iter()
                .any(|field| field.to_lowercase().contains(text.as_str()));
            if !hit {
                return false;
            }
        }

        if self.category.is_some_and(|c| c != listing.category) {
            return false;
        }
        if self.subtype.as_ref().is_some_and(|s| *s != listing.subtype) {
            return false;
        }
        let price = listing.price as f64;
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if self.area_unit.is_some_and(|u| u != listing.area_unit) {
            return false;
        }

        let counts = [
            (self.beds, listing.beds),
            (self.baths, listing.baths),
            (self.balconies, listing.balconies),
            (self.parking, listing.parking),
        ];
        if counts
            .iter()
            .any(|(filter, count)| filter.is_some_and(|f| !f.matches(*count)))
        {
            return false;
        }

        if self.facing.is_some() && self.facing != listing.facing {
            return false;
        }
        if self.condition.is_some() && self.condition != listing.condition {
            return false;
        }
        if !self.amenities.iter().all(|a| listing.has_amenity(a)) {
            return false;
        }
        if self.require_validation && !listing.is_validated {
            return false;
        }

        true
    }
}

fn parse_with<T>(
    params: &FilterParams,
    key: FilterKey,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = params.get(key)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        debug!("Ignoring malformed {} filter {:?}", key, raw);
    }
    parsed
}

// Any non-negative decimal, including exponent forms like "1.5e7"
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

fn parse_enum<T: FromStr>(params: &FilterParams, key: FilterKey) -> Option<T> {
    parse_with(params, key, |s| s.trim().parse().ok())
}
