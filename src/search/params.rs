use super::sort::SortOrder;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use url::form_urlencoded;

/// Values the selectors use to mean "no filter"
const UNSET_SENTINELS: [&str; 3] = ["Any", "No Min", "No Max"];

/// A recognised search URL parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Query,
    Sort,
    Type,
    SubType,
    MinPrice,
    MaxPrice,
    AreaUnit,
    Beds,
    Baths,
    Balconies,
    Parking,
    Facing,
    Condition,
    Amenity,
    Service,
}

impl FilterKey {
    pub const ALL: [FilterKey; 15] = [
        FilterKey::Query,
        FilterKey::Sort,
        FilterKey::Type,
        FilterKey::SubType,
        FilterKey::MinPrice,
        FilterKey::MaxPrice,
        FilterKey::AreaUnit,
        FilterKey::Beds,
        FilterKey::Baths,
        FilterKey::Balconies,
        FilterKey::Parking,
        FilterKey::Facing,
        FilterKey::Condition,
        FilterKey::Amenity,
        FilterKey::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Query => "q",
            FilterKey::Sort => "sort",
            FilterKey::Type => "type",
            FilterKey::SubType => "subType",
            FilterKey::MinPrice => "minPrice",
            FilterKey::MaxPrice => "maxPrice",
            FilterKey::AreaUnit => "areaUnit",
            FilterKey::Beds => "beds",
            FilterKey::Baths => "baths",
            FilterKey::Balconies => "balconies",
            FilterKey::Parking => "parking",
            FilterKey::Facing => "facing",
            FilterKey::Condition => "condition",
            FilterKey::Amenity => "amenity",
            FilterKey::Service => "service",
        }
    }

    /// Keys that may repeat, one parameter per selected value
    pub fn is_multi(&self) -> bool {
        matches!(self, FilterKey::Amenity | FilterKey::Service)
    }

    /// Search text and sort order travel in the URL but are not filters
    pub fn is_filter(&self) -> bool {
        !matches!(self, FilterKey::Query | FilterKey::Sort)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || UNSET_SENTINELS.contains(&value)
}

/// The active search selections, kept in the same shape as the URL query
/// string they are shared through: an ordered list of key/value pairs where
/// set-valued keys repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pairs: Vec<(FilterKey, String)>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value stored for `key`
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored for `key`, in the order they were added
    pub fn get_all(&self, key: FilterKey) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: FilterKey, value: &str) -> bool {
        self.pairs.iter().any(|(k, v)| *k == key && v == value)
    }

    /// Overwrite `key`. Empty strings and the "Any"/"No Min"/"No Max"
    /// sentinels remove it instead.
    pub fn set(&mut self, key: FilterKey, value: &str) {
        if is_unset(value) {
            self.remove(key);
            return;
        }

        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.pairs[first].1 = value.to_string();
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = *k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key, value.to_string())),
        }
    }

    /// Add `value` under `key` if absent, otherwise remove it. Unset values
    /// are ignored so the store never holds anything the URL cannot carry.
    pub fn toggle_array(&mut self, key: FilterKey, value: &str) {
        if is_unset(value) {
            return;
        }
        if self.contains(key, value) {
            self.pairs.retain(|(k, v)| !(*k == key && v == value));
        } else {
            self.pairs.push((key, value.to_string()));
        }
    }

    pub fn remove(&mut self, key: FilterKey) {
        self.pairs.retain(|(k, _)| *k != key);
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        match sort {
            SortOrder::Relevance => self.remove(FilterKey::Sort),
            other => self.set(FilterKey::Sort, other.as_str()),
        }
    }

    /// Reset everything, search text and sort order included
    pub fn clear_all(&mut self) {
        self.pairs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of active filter values, not counting search text or sort
    pub fn active_filter_count(&self) -> usize {
        self.pairs.iter().filter(|(k, _)| k.is_filter()).count()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rebuild from raw URL pairs. Unknown keys and unset values are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key.parse::<FilterKey>() {
                Ok(key) if !is_unset(value) => params.pairs.push((key, value.to_string())),
                Ok(_) => {}
                Err(()) => debug!("Ignoring unknown search parameter {:?}", key),
            }
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Parse a query string, with or without its leading `?`
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }
}

impl fmt::Display for FilterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn set_replaces_and_sentinels_remove() {
        let mut params = FilterParams::new();
        params.set(FilterKey::Beds, "3");
        params.set(FilterKey::Type, "Residential");
        params.set(FilterKey::Beds, "5+");
        assert_eq!(params.get(FilterKey::Beds), Some("5+"));
        assert_eq!(params.to_query_string(), "beds=5%2B&type=Residential");

        params.set(FilterKey::Beds, "Any");
        params.set(FilterKey::MinPrice, "No Min");
        params.set(FilterKey::Type, "");
        assert!(params.is_empty());
    }

    #[test]
    fn set_collapses_repeated_values() {
        let mut params = FilterParams::from_query_string("amenity=CCTV&q=pune&amenity=Library");
        params.set(FilterKey::Amenity, "Intercom");
        assert_eq!(params.get_all(FilterKey::Amenity), vec!["Intercom"]);
        assert_eq!(params.to_query_string(), "amenity=Intercom&q=pune");
    }

    #[test]
    fn toggle_keeps_insertion_order() {
        let mut params = FilterParams::new();
        params.toggle_array(FilterKey::Amenity, "Gymnasium");
        params.toggle_array(FilterKey::Amenity, "CCTV");
        params.toggle_array(FilterKey::Amenity, "Library");
        params.toggle_array(FilterKey::Amenity, "CCTV");
        assert_eq!(
            params.get_all(FilterKey::Amenity),
            vec!["Gymnasium", "Library"]
        );
        assert!(params.get_all(FilterKey::Service).is_empty());
    }

    #[test]
    fn clear_all_drops_query_and_sort() {
        let mut params = FilterParams::new();
        params.set(FilterKey::Query, "bandra");
        params.set_sort(SortOrder::PriceDesc);
        params.set(FilterKey::Facing, "East");
        params.clear_all();
        assert_eq!(params.get(FilterKey::Query), None);
        assert_eq!(params.get(FilterKey::Sort), None);
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn decode_ignores_unknown_keys_and_leading_question_mark() {
        let params = FilterParams::from_query_string("?utm_source=mail&type=Commercial&beds=");
        assert_eq!(params.get(FilterKey::Type), Some("Commercial"));
        assert_eq!(params.get(FilterKey::Beds), None);
        assert_eq!(params.pairs().count(), 1);
    }

    #[test]
    fn decodes_spaces_and_plus_signs() {
        let params = FilterParams::from_query_string("q=bandra+west&baths=5%2B&facing=North%20East");
        assert_eq!(params.get(FilterKey::Query), Some("bandra west"));
        assert_eq!(params.get(FilterKey::Baths), Some("5+"));
        assert_eq!(params.get(FilterKey::Facing), Some("North East"));
    }

    #[test]
    fn active_count_skips_search_and_sort() {
        let params =
            FilterParams::from_query_string("q=pune&sort=newest&amenity=CCTV&amenity=Library&beds=2");
        assert_eq!(params.active_filter_count(), 3);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set(FilterKey, String),
        Toggle(FilterKey, String),
    }

    fn key() -> impl Strategy<Value = FilterKey> {
        proptest::sample::select(FilterKey::ALL.to_vec())
    }

    fn value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("Any".to_string()),
            Just("5+".to_string()),
            Just("North East".to_string()),
            Just("a&b=c".to_string()),
            "[ -~]{0,12}",
            "\\PC{0,6}",
        ]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (key(), value()).prop_map(|(k, v)| Op::Set(k, v)),
            (key(), value()).prop_map(|(k, v)| Op::Toggle(k, v)),
        ]
    }

    proptest! {
        #[test]
        fn query_string_round_trips(ops in proptest::collection::vec(op(), 0..24)) {
            let mut params = FilterParams::new();
            for op in ops {
                match op {
                    Op::Set(k, v) => params.set(k, &v),
                    Op::Toggle(k, v) => params.toggle_array(k, &v),
                }
            }

            let decoded = FilterParams::from_query_string(&params.to_query_string());
            for key in FilterKey::ALL {
                prop_assert_eq!(decoded.get(key), params.get(key));
                prop_assert_eq!(decoded.get_all(key), params.get_all(key));
            }
        }
    }
}
