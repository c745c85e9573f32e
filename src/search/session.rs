use super::criteria::SearchCriteria;
use super::params::{FilterKey, FilterParams};
use super::results::assemble_indices;
use super::sort::SortOrder;
use crate::models::catalog::{preset_label, MAX_PRICE_PRESETS, MIN_PRICE_PRESETS};
use crate::models::ListingRecord;
use tracing::debug;

/// A removable chip describing one active filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTag {
    pub key: FilterKey,
    pub value: String,
    pub label: String,
}

/// One browsing session: the listing collection loaded for the page plus
/// the filter selections the user is editing.
///
/// Results are recomputed only when the encoded selections change.
pub struct SearchSession {
    listings: Vec<ListingRecord>,
    params: FilterParams,
    cache: Option<(String, Vec<usize>)>,
}

impl SearchSession {
    pub fn new(listings: Vec<ListingRecord>) -> Self {
        Self::with_params(listings, FilterParams::new())
    }

    /// Start from a shared search URL's query string
    pub fn with_query(listings: Vec<ListingRecord>, query: &str) -> Self {
        Self::with_params(listings, FilterParams::from_query_string(query))
    }

    pub fn with_params(listings: Vec<ListingRecord>, params: FilterParams) -> Self {
        Self {
            listings,
            params,
            cache: None,
        }
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn listings(&self) -> &[ListingRecord] {
        &self.listings
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.params.get(key)
    }

    pub fn get_all(&self, key: FilterKey) -> Vec<&str> {
        self.params.get_all(key)
    }

    pub fn set(&mut self, key: FilterKey, value: &str) {
        self.params.set(key, value);
        // Subtypes belong to a type, so changing type resets the subtype
        if key == FilterKey::Type {
            self.params.remove(FilterKey::SubType);
        }
        debug!("Search updated: {}", self.params);
    }

    pub fn toggle_array(&mut self, key: FilterKey, value: &str) {
        self.params.toggle_array(key, value);
        debug!("Search updated: {}", self.params);
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.params.set_sort(sort);
    }

    pub fn sort(&self) -> SortOrder {
        SortOrder::from_params(&self.params)
    }

    pub fn clear_all(&mut self) {
        self.params.clear_all();
        debug!("Search cleared");
    }

    /// Shareable query string for the current selections
    pub fn query_string(&self) -> String {
        self.params.to_query_string()
    }

    pub fn active_filter_count(&self) -> usize {
        self.params.active_filter_count()
    }

    /// Matching listings in display order
    pub fn results(&mut self) -> Vec<&ListingRecord> {
        let key = self.params.to_query_string();
        let stale = self.cache.as_ref().map_or(true, |(cached, _)| *cached != key);
        if stale {
            let criteria = SearchCriteria::from_params(&self.params);
            let indices = assemble_indices(&self.listings, &criteria, self.sort());
            debug!("Recomputed results for {:?}", key);
            self.cache = Some((key, indices));
        }

        match &self.cache {
            Some((_, indices)) => indices.iter().map(|&i| &self.listings[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Chips for every active filter, in the order the panel shows them
    pub fn tags(&self) -> Vec<FilterTag> {
        const SCALAR: [(FilterKey, &str); 11] = [
            (FilterKey::Type, "Type"),
            (FilterKey::SubType, "Sub"),
            (FilterKey::MinPrice, "Min"),
            (FilterKey::MaxPrice, "Max"),
            (FilterKey::AreaUnit, "Area"),
            (FilterKey::Beds, "Beds"),
            (FilterKey::Baths, "Baths"),
            (FilterKey::Balconies, "Balconies"),
            (FilterKey::Parking, "Parking"),
            (FilterKey::Facing, "Facing"),
            (FilterKey::Condition, "Condition"),
        ];

        let mut tags = Vec::new();
        for (key, prefix) in SCALAR {
            let Some(value) = self.params.get(key) else {
                continue;
            };
            let shown = match key {
                FilterKey::MinPrice => preset_label(&MIN_PRICE_PRESETS, value).unwrap_or(value),
                FilterKey::MaxPrice => preset_label(&MAX_PRICE_PRESETS, value).unwrap_or(value),
                _ => value,
            };
            tags.push(FilterTag {
                key,
                value: value.to_string(),
                label: format!("{}: {}", prefix, shown),
            });
        }

        for key in [FilterKey::Amenity, FilterKey::Service] {
            for value in self.params.get_all(key) {
                tags.push(FilterTag {
                    key,
                    value: value.to_string(),
                    label: value.to_string(),
                });
            }
        }
        tags
    }

    /// Drop the filter value a chip stands for
    pub fn remove_tag(&mut self, tag: &FilterTag) {
        if tag.key.is_multi() {
            if self.params.contains(tag.key, &tag.value) {
                self.params.toggle_array(tag.key, &tag.value);
            }
        } else {
            self.params.remove(tag.key);
        }
    }
}
