//! Car Finder - vehicle catalog service
//!
//! Serves a fixed collection of vehicle listings with search, filtering,
//! sorting and pagination, plus a locally persisted wishlist and theme
//! preference.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Catalog, BrowseResult, Facets};
pub use models::{Listing, FuelType, FavoriteEntry, QueryState, FilterChange, SortKey, Theme, Preference};
pub use routes::AppState;
pub use services::{FavoritesStore, PreferenceStore, ListingRepository, ListingSource};
