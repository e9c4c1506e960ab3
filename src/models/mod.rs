// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Listing, FuelType, FavoriteEntry, Theme, Preference, SortKey, QueryState, FilterChange, DEFAULT_MAX_PRICE};
pub use requests::{BrowseParams, AddFavoriteRequest, SaveThemeRequest};
pub use responses::{
    BrowseResponse, FacetsResponse, ListingDetailResponse, WishlistResponse, WishlistAddResponse, WishlistRemoveResponse,
    WishlistMembershipResponse, WishlistClearedResponse, ThemeResponse, HealthResponse, ErrorResponse,
};
