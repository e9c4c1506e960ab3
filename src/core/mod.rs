// Core pipeline exports
pub mod catalog;
pub mod filters;
pub mod pagination;
pub mod sorting;

pub use catalog::{Catalog, BrowseResult, Facets};
pub use filters::{matches_search, matches_brand, within_price_range, matches_fuel_type, meets_seating, matches_query};
pub use pagination::{page_slice, total_pages, DEFAULT_PAGE_SIZE};
pub use sorting::sort_listings;
