// Route exports
pub mod listings;
pub mod preferences;
pub mod wishlist;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::core::Catalog;
use crate::models::ErrorResponse;
use crate::services::{FavoritesStore, ListingError, ListingRepository, PreferenceStore, StorageError};

/// Application state shared across all handlers
///
/// Every store is passed in by the caller, so tests can swap in in-memory
/// storage or a different listing source.
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<ListingRepository>,
    pub catalog: Catalog,
    pub favorites: Arc<Mutex<FavoritesStore>>,
    pub preferences: PreferenceStore,
}

impl AppState {
    pub fn new(
        listings: ListingRepository,
        catalog: Catalog,
        favorites: FavoritesStore,
        preferences: PreferenceStore,
    ) -> Self {
        Self {
            listings: Arc::new(listings),
            catalog,
            favorites: Arc::new(Mutex::new(favorites)),
            preferences,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(listings::configure)
            .configure(wishlist::configure)
            .configure(preferences::configure),
    );
}

/// 503 for a failed listing load; the client may retry
pub(crate) fn listings_unavailable(err: &ListingError) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "listings_unavailable".to_string(),
        message: format!("Failed to load listings: {}", err),
        status_code: 503,
        retryable: true,
    })
}

/// Run a storage call on actix's blocking thread pool
///
/// Local writes touch the disk and must not stall the worker's event loop.
pub(crate) async fn run_blocking<F, R>(call: F) -> Result<R, StorageError>
where
    F: FnOnce() -> Result<R, StorageError> + Send + 'static,
    R: Send + 'static,
{
    web::block(call)
        .await
        .map_err(|e| StorageError::TaskFailed(e.to_string()))?
}

/// 500 for a failed local write; the change was not saved
pub(crate) fn not_saved(err: &StorageError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "not_saved".to_string(),
        message: err.to_string(),
        status_code: 500,
        retryable: true,
    })
}

pub(crate) fn listing_not_found(id: u32) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "listing_not_found".to_string(),
        message: format!("No listing with id {}", id),
        status_code: 404,
        retryable: false,
    })
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
        retryable: false,
    })
}
