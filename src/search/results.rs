use super::criteria::SearchCriteria;
use super::params::FilterParams;
use super::sort::SortOrder;
use crate::models::ListingRecord;

/// Filter `listings` by `params`, then order the survivors by `sort`.
///
/// Both steps are stable: listings that tie (or every listing, under
/// relevance) keep their input order.
pub fn assemble<'a>(
    listings: &'a [ListingRecord],
    params: &FilterParams,
    sort: SortOrder,
) -> Vec<&'a ListingRecord> {
    assemble_with(listings, &SearchCriteria::from_params(params), sort)
}

pub fn assemble_with<'a>(
    listings: &'a [ListingRecord],
    criteria: &SearchCriteria,
    sort: SortOrder,
) -> Vec<&'a ListingRecord> {
    assemble_indices(listings, criteria, sort)
        .into_iter()
        .map(|i| &listings[i])
        .collect()
}

/// Positions in `listings` of the results, in display order
pub fn assemble_indices(
    listings: &[ListingRecord],
    criteria: &SearchCriteria,
    sort: SortOrder,
) -> Vec<usize> {
    let mut indices: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, l)| criteria.matches(l))
        .map(|(i, _)| i)
        .collect();
    if sort != SortOrder::Relevance {
        indices.sort_by(|&a, &b| sort.compare(&listings[a], &listings[b]));
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AreaUnit, Category, ListingStatus};
    use chrono::{TimeZone, Utc};

    fn listing(id: &str, price: u64, day: u32) -> ListingRecord {
        ListingRecord {
            id: id.into(),
            title: format!("Listing {}", id),
            category: Category::Commercial,
            subtype: "Office Space".into(),
            price,
            area: 600.0,
            area_unit: AreaUnit::SquareFeet,
            beds: 0,
            baths: 1,
            balconies: 0,
            parking: 1,
            facing: None,
            condition: None,
            location: "BKC, Mumbai".into(),
            city: "Mumbai".into(),
            status: ListingStatus::Active,
            is_validated: price % 2 == 0,
            is_featured: false,
            posted_at: Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0).unwrap(),
            amenities: Vec::new(),
            owner_id: None,
        }
    }

    fn ids(results: &[&ListingRecord]) -> Vec<String> {
        results.iter().map(|l| l.id.clone()).collect()
    }

    fn collection() -> Vec<ListingRecord> {
        vec![
            listing("a", 300, 3),
            listing("b", 100, 9),
            listing("c", 200, 1),
            listing("d", 100, 5),
            listing("e", 501, 7),
        ]
    }

    #[test]
    fn relevance_keeps_input_order() {
        let listings = collection();
        let results = assemble(&listings, &FilterParams::new(), SortOrder::Relevance);
        assert_eq!(ids(&results), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn price_sorts_are_stable() {
        let listings = collection();
        let params = FilterParams::new();
        let asc = assemble(&listings, &params, SortOrder::PriceAsc);
        assert_eq!(ids(&asc), ["b", "d", "c", "a", "e"]);
        let desc = assemble(&listings, &params, SortOrder::PriceDesc);
        assert_eq!(ids(&desc), ["e", "a", "c", "b", "d"]);
    }

    #[test]
    fn newest_first() {
        let listings = collection();
        let results = assemble(&listings, &FilterParams::new(), SortOrder::Newest);
        assert_eq!(ids(&results), ["b", "e", "d", "a", "c"]);
    }

    #[test]
    fn sort_and_filter_commute() {
        let listings = collection();
        let params = FilterParams::from_query_string("service=Validation");
        let criteria = SearchCriteria::from_params(&params);

        let filtered_then_sorted = assemble(&listings, &params, SortOrder::PriceAsc);
        let sorted_then_filtered: Vec<&ListingRecord> =
            assemble(&listings, &FilterParams::new(), SortOrder::PriceAsc)
                .into_iter()
                .filter(|l| criteria.matches(l))
                .collect();

        assert_eq!(ids(&filtered_then_sorted), ids(&sorted_then_filtered));
        assert_eq!(ids(&filtered_then_sorted), ["b", "d", "c", "a"]);
    }

    #[test]
    fn empty_collection() {
        let results = assemble(&[], &FilterParams::new(), SortOrder::Newest);
        assert!(results.is_empty());
    }

    #[test]
    fn deterministic() {
        let listings = collection();
        let params = FilterParams::from_query_string("maxPrice=300&sort=price_asc");
        let sort = SortOrder::from_params(&params);
        assert_eq!(
            ids(&assemble(&listings, &params, sort)),
            ids(&assemble(&listings, &params, sort))
        );
    }
}
