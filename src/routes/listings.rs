use actix_web::{web, HttpResponse, Responder};
use chrono::Datelike;
use validator::Validate;
use crate::models::{BrowseParams, BrowseResponse, FacetsResponse, HealthResponse, ListingDetailResponse};
use crate::routes::{bad_request, listing_not_found, listings_unavailable, AppState};

/// Related listings shown on the detail view
const RELATED_LIMIT: usize = 4;

/// Configure all listing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/cars", web::get().to(list_all))
        .route("/cars/search", web::get().to(browse))
        .route("/cars/reload", web::post().to(reload))
        .route("/cars/{id}", web::get().to(get_listing));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let listings = state.listings.cached_count().await;
    let cache = if listings.is_some() { "warm" } else { "cold" };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: cache.to_string(),
        listings,
    })
}

/// Full listing collection
///
/// GET /api/v1/cars
async fn list_all(state: web::Data<AppState>) -> impl Responder {
    match state.listings.get_all().await {
        Ok(listings) => HttpResponse::Ok().json(listings.as_slice()),
        Err(e) => listings_unavailable(&e),
    }
}

/// Browse endpoint
///
/// GET /api/v1/cars/search?search=&brand=&minPrice=&maxPrice=&fuelType=&seating=&sort=&page=
async fn browse(
    state: web::Data<AppState>,
    params: web::Query<BrowseParams>,
) -> impl Responder {
    if let Err(errors) = params.validate() {
        tracing::info!("Validation failed for browse request: {:?}", errors);
        return bad_request("validation_failed", errors.to_string());
    }

    let query = match params.to_query_state() {
        Ok(query) => query,
        Err(message) => return bad_request("invalid_query", message),
    };

    let listings = match state.listings.get_all().await {
        Ok(listings) => listings,
        Err(e) => return listings_unavailable(&e),
    };

    let result = state.catalog.browse(&listings, &query);
    let facets = state.catalog.facets(&listings);

    tracing::debug!(
        search = %query.search,
        brand = ?query.brand,
        sort = query.sort.as_str(),
        page = result.page,
        total = result.total_results,
        "browse"
    );

    HttpResponse::Ok().json(BrowseResponse {
        listings: result.listings,
        total_results: result.total_results,
        page: result.page,
        page_size: result.page_size,
        total_pages: result.total_pages,
        facets: FacetsResponse {
            brands: facets.brands,
            fuel_types: facets.fuel_types,
        },
    })
}

/// Detail endpoint
///
/// GET /api/v1/cars/{id}
async fn get_listing(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();

    let listings = match state.listings.get_all().await {
        Ok(listings) => listings,
        Err(e) => return listings_unavailable(&e),
    };
    let listing = match state.catalog.find(&listings, id) {
        Some(listing) => listing,
        None => return listing_not_found(id),
    };

    let related = state
        .catalog
        .related(&listings, listing, RELATED_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    let in_wishlist = state.favorites.lock().await.contains(id);
    let is_new_model = listing.is_new_model(chrono::Utc::now().year());

    HttpResponse::Ok().json(ListingDetailResponse {
        listing: listing.clone(),
        is_new_model,
        in_wishlist,
        related,
    })
}

/// Drop the cached collection and load it again
///
/// POST /api/v1/cars/reload
async fn reload(state: web::Data<AppState>) -> impl Responder {
    match state.listings.reload().await {
        Ok(listings) => {
            tracing::info!(count = listings.len(), "listings reloaded on request");
            HttpResponse::Ok().json(serde_json::json!({ "count": listings.len() }))
        }
        Err(e) => listings_unavailable(&e),
    }
}
