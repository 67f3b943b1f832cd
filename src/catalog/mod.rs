pub mod filter;
pub mod models;

pub use filter::{ALL_CATEGORIES, FilterState, filter_items};
pub use models::{Catalog, Item};
