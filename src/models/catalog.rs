//! Lookup tables for the marketplace: the vocabularies listings are drawn
//! from and the presets the filter panel offers.

use super::{Category, ServiceTag};

pub fn subtypes_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Residential => &[
            "Apartments",
            "Builder Floor",
            "Independent House",
            "Villas",
            "Studio Apartments",
            "Open Plots",
            "Project",
        ],
        Category::Commercial => &[
            "Office Space",
            "Retail Shops",
            "Ware Houses",
            "Industrial",
            "Commercial Buildings",
            "Others",
            "Project",
        ],
        Category::Agricultural => &["Agricultural Land", "Farm House", "Farm Plots", "Others"],
        Category::Development => &[
            "Commercial",
            "Apartment",
            "Plot Development",
            "Independent House",
            "Others",
        ],
    }
}

/// Subtypes offered when no category is selected, deduplicated in table order
pub fn all_subtypes() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for category in Category::ALL {
        for subtype in subtypes_for(*category) {
            if !out.contains(subtype) {
                out.push(*subtype);
            }
        }
    }
    out
}

pub const AMENITIES: [&str; 25] = [
    "24 X 7 Security",
    "Amphitheater",
    "Banquet Hall",
    "Basketball Court",
    "Car Parking",
    "CCTV",
    "Children Play Area",
    "Closed Car Parking",
    "Club House",
    "Gated Community",
    "Gymnasium",
    "Indoor Games",
    "Intercom",
    "Jogging Track",
    "Landscaped Gardens",
    "Library",
    "Multipurpose Room",
    "Power Backup",
    "Rain Water Harvesting",
    "Sewage Treatment Plant",
    "Staff Quarter",
    "Street Lighting",
    "Storm Water Drains",
    "Swimming Pool",
    "Vaastu Compliant",
];

/// A labelled price threshold in the min/max selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePreset {
    pub label: &'static str,
    pub value: u64,
}

const fn preset(label: &'static str, value: u64) -> PricePreset {
    PricePreset { label, value }
}

pub const MIN_PRICE_PRESETS: [PricePreset; 8] = [
    preset("> 25 Lakh", 2_500_000),
    preset("> 45 Lakh", 4_500_000),
    preset("> 65 Lakh", 6_500_000),
    preset("> 85 Lakh", 8_500_000),
    preset("> 1 Crore", 10_000_000),
    preset("> 2 Crore", 20_000_000),
    preset("> 3 Crore", 30_000_000),
    preset("> 4 Crore", 40_000_000),
];

pub const MAX_PRICE_PRESETS: [PricePreset; 8] = [
    preset("< 45 Lakh", 4_500_000),
    preset("< 65 Lakh", 6_500_000),
    preset("< 85 Lakh", 8_500_000),
    preset("< 1 Crore", 10_000_000),
    preset("< 2 Crore", 20_000_000),
    preset("< 3 Crore", 30_000_000),
    preset("< 4 Crore", 40_000_000),
    preset("< 5 Crore", 50_000_000),
];

/// Choices for the bed/bath/balcony/parking selectors; "Any" clears the filter
pub const COUNT_OPTIONS: [&str; 6] = ["Any", "1", "2", "3", "4", "5+"];

pub const SERVICE_OPTIONS: [ServiceTag; 3] = [
    ServiceTag::Auction,
    ServiceTag::GroupBuying,
    ServiceTag::Validation,
];

/// Look up the preset label for a raw price value, if it is one of the presets
pub fn preset_label(presets: &[PricePreset], raw: &str) -> Option<&'static str> {
    let value: u64 = raw.trim().parse().ok()?;
    presets.iter().find(|p| p.value == value).map(|p| p.label)
}

/// Format a rupee amount the way listings display it: crores, lakhs, or
/// Indian digit grouping below one lakh.
pub fn format_price(price: u64) -> String {
    if price >= 10_000_000 {
        format!("₹{:.2} Cr", price as f64 / 10_000_000.0)
    } else if price >= 100_000 {
        format!("₹{:.2} L", price as f64 / 100_000.0)
    } else {
        format!("₹{}", group_indian(price))
    }
}

// 1234567 -> "12,34,567": last three digits, then groups of two
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
