use thiserror::Error;

/// A listing that breaks the catalog's data contract
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListingError {
    #[error("listing {id}: subtype {subtype:?} is not valid for {category}")]
    InvalidSubtype {
        id: String,
        category: String,
        subtype: String,
    },
    #[error("listing {id}: unknown amenity {amenity:?}")]
    UnknownAmenity { id: String, amenity: String },
}

/// A string that names no variant of a closed enumeration
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unrecognized {kind}: {value:?}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
