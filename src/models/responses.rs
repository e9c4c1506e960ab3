use serde::{Deserialize, Serialize};
use crate::models::domain::{FavoriteEntry, FuelType, Listing, Preference, Theme};

/// Response for the browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
    pub listings: Vec<Listing>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    pub facets: FacetsResponse,
}

/// Filter options derived from the full collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub brands: Vec<String>,
    #[serde(rename = "fuelTypes")]
    pub fuel_types: Vec<FuelType>,
}

/// Response for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDetailResponse {
    pub listing: Listing,
    #[serde(rename = "isNewModel")]
    pub is_new_model: bool,
    #[serde(rename = "inWishlist")]
    pub in_wishlist: bool,
    /// Similar listings, at most four
    pub related: Vec<Listing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistResponse {
    pub items: Vec<FavoriteEntry>,
    pub count: usize,
}

/// Response for POST /wishlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistAddResponse {
    pub id: u32,
    /// False when the listing was already saved
    pub added: bool,
    #[serde(rename = "inWishlist")]
    pub in_wishlist: bool,
}

/// Response for DELETE /wishlist/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistRemoveResponse {
    pub id: u32,
    /// False when the listing was not saved
    pub removed: bool,
    #[serde(rename = "inWishlist")]
    pub in_wishlist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistMembershipResponse {
    pub id: u32,
    #[serde(rename = "inWishlist")]
    pub in_wishlist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistClearedResponse {
    pub cleared: usize,
}

/// Both fields are null until a theme has been saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Option<Theme>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Option<Preference>> for ThemeResponse {
    fn from(preference: Option<Preference>) -> Self {
        match preference {
            Some(p) => Self {
                theme: Some(p.theme),
                updated_at: Some(p.updated_at),
            },
            None => Self {
                theme: None,
                updated_at: None,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// "warm" when the listing collection is cached, "cold" otherwise
    pub cache: String,
    /// Cached listing count, absent while the cache is cold
    pub listings: Option<usize>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default)]
    pub retryable: bool,
}
