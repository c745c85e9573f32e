pub mod file;
pub mod rest;
pub mod traits;

pub use file::JsonFileSource;
pub use rest::RestSource;
pub use traits::ListingSource;
