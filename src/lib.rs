pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod sources;

pub use error::{ListingError, ParseValueError};
pub use models::ListingRecord;
pub use search::{FilterKey, FilterParams, SearchCriteria, SearchSession, SortOrder};
