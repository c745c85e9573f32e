pub mod catalog;

use crate::error::{ListingError, ParseValueError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Closed string enumerations shared by listings and filters.
///
/// Each variant has one canonical spelling (used for display, JSON and URLs)
/// plus any legacy spellings the data still carries.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $canonical:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $canonical),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($canonical $(| $alias)* => Ok($name::$variant),)+
                    other => Err(ParseValueError::new($kind, other)),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum! {
    /// Top-level property category
    Category, "property type" {
        Residential => "Residential",
        Commercial => "Commercial",
        Agricultural => "Agricultural",
        Development => "Development",
    }
}

string_enum! {
    /// Unit the listing's area is measured in
    AreaUnit, "area unit" {
        SquareFeet => "Square feet" | "sq.ft",
        SquareYards => "Square yards" | "sq.yd",
        Cents => "Cents",
        Acres => "Acres",
    }
}

string_enum! {
    /// Direction the main entrance faces
    Facing, "facing" {
        North => "North",
        East => "East",
        West => "West",
        South => "South",
        NorthEast => "North East" | "North-East",
        NorthWest => "North West" | "North-West",
        SouthEast => "South East" | "South-East",
        SouthWest => "South West" | "South-West",
    }
}

string_enum! {
    PropertyCondition, "condition" {
        New => "New",
        Resale => "Resale",
        Foreclosure => "Foreclosure",
    }
}

string_enum! {
    /// Moderation state of a listing
    #[derive(Default)]
    ListingStatus, "listing status" {
        Draft => "Draft",
        AwaitingApproval => "Awaiting Approval",
        UnderReview => "Under Review",
        #[default]
        Active => "Active",
        Sold => "Sold",
        Rejected => "Rejected",
    }
}

string_enum! {
    /// Paid marketplace services a buyer can filter on
    ServiceTag, "service" {
        Auction => "Auction",
        GroupBuying => "Group Buying",
        Validation => "Validation" | "Property Validation",
    }
}

/// Core property listing as consumed by the search engine.
///
/// Field names follow the marketplace front end; aliases accept the
/// backend's `properties` table columns so rows deserialize directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", alias = "property_type")]
    pub category: Category,
    #[serde(alias = "property_subtype")]
    pub subtype: String,
    #[serde(alias = "total_cost", deserialize_with = "whole_rupees")]
    pub price: u64,
    #[serde(alias = "area_value")]
    pub area: f64,
    #[serde(alias = "area_unit")]
    pub area_unit: AreaUnit,
    #[serde(default, alias = "bedrooms", deserialize_with = "null_as_default")]
    pub beds: u32,
    #[serde(default, alias = "bathrooms", deserialize_with = "null_as_default")]
    pub baths: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balconies: u32,
    #[serde(default, alias = "car_parking", deserialize_with = "null_as_default")]
    pub parking: u32,
    #[serde(default, deserialize_with = "known_or_none")]
    pub facing: Option<Facing>,
    #[serde(default, alias = "property_condition", deserialize_with = "known_or_none")]
    pub condition: Option<PropertyCondition>,
    #[serde(alias = "locality")]
    pub location: String,
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ListingStatus,
    #[serde(default, alias = "is_rr_validated", deserialize_with = "null_as_default")]
    pub is_validated: bool,
    #[serde(default, alias = "is_featured", deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(
        rename = "postedDate",
        alias = "created_at",
        deserialize_with = "posted_at"
    )]
    pub posted_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default, alias = "seller_id")]
    pub owner_id: Option<String>,
}

impl ListingRecord {
    /// Check the category/subtype pairing and amenity vocabulary
    pub fn validate(&self) -> Result<(), ListingError> {
        if !catalog::subtypes_for(self.category).contains(&self.subtype.as_str()) {
            return Err(ListingError::InvalidSubtype {
                id: self.id.clone(),
                category: self.category.to_string(),
                subtype: self.subtype.clone(),
            });
        }

        if let Some(unknown) = self
            .amenities
            .iter()
            .find(|a| !catalog::AMENITIES.contains(&a.as_str()))
        {
            return Err(ListingError::UnknownAmenity {
                id: self.id.clone(),
                amenity: unknown.clone(),
            });
        }

        Ok(())
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// The backend stores prices as NUMERIC, so fractional amounts show up.
fn whole_rupees<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = f64::deserialize(deserializer)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(serde::de::Error::custom(format!("invalid price: {}", amount)));
    }
    Ok(amount.round() as u64)
}

// Free-text columns: blank or unrecognised values read as absent.
fn known_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = ParseValueError>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .and_then(|r| match r.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Reading {} as absent", e);
                None
            }
        }))
}

// Listings carry either a bare date ("2026-02-15") or a full timestamp.
fn posted_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_posted_at(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid posted date: {:?}", raw))
    })
}

pub fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
