pub mod criteria;
pub mod params;
pub mod results;
pub mod session;
pub mod sort;

pub use criteria::{CountFilter, SearchCriteria};
pub use params::{FilterKey, FilterParams};
pub use results::{assemble, assemble_indices, assemble_with};
pub use session::{FilterTag, SearchSession};
pub use sort::SortOrder;
