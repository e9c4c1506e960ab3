use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AddFavoriteRequest, WishlistAddResponse, WishlistClearedResponse, WishlistMembershipResponse,
    WishlistRemoveResponse, WishlistResponse,
};
use crate::routes::{bad_request, listing_not_found, listings_unavailable, not_saved, run_blocking, AppState};

/// Configure all wishlist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/wishlist", web::get().to(list_wishlist))
        .route("/wishlist", web::post().to(add_to_wishlist))
        .route("/wishlist", web::delete().to(clear_wishlist))
        .route("/wishlist/{id}", web::get().to(check_wishlist))
        .route("/wishlist/{id}", web::delete().to(remove_from_wishlist));
}

/// GET /api/v1/wishlist
async fn list_wishlist(state: web::Data<AppState>) -> impl Responder {
    let items = state.favorites.lock().await.list();
    HttpResponse::Ok().json(WishlistResponse {
        count: items.len(),
        items,
    })
}

/// Add a listing snapshot to the wishlist
///
/// POST /api/v1/wishlist
///
/// Request body:
/// ```json
/// { "id": 7 }
/// ```
async fn add_to_wishlist(
    state: web::Data<AppState>,
    req: web::Json<AddFavoriteRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    let listing = match state.listings.get_by_id(req.id).await {
        Ok(Some(listing)) => listing,
        Ok(None) => return listing_not_found(req.id),
        Err(e) => return listings_unavailable(&e),
    };

    let id = listing.id;
    let favorites = state.favorites.clone();
    match run_blocking(move || favorites.blocking_lock().add(&listing)).await {
        Ok(added) => HttpResponse::Ok().json(WishlistAddResponse {
            id,
            added,
            in_wishlist: true,
        }),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to save wishlist entry");
            not_saved(&e)
        }
    }
}

/// GET /api/v1/wishlist/{id}
async fn check_wishlist(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();
    let in_wishlist = state.favorites.lock().await.contains(id);
    HttpResponse::Ok().json(WishlistMembershipResponse { id, in_wishlist })
}

/// DELETE /api/v1/wishlist/{id}
async fn remove_from_wishlist(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();
    let favorites = state.favorites.clone();

    match run_blocking(move || favorites.blocking_lock().remove(id)).await {
        Ok(removed) => HttpResponse::Ok().json(WishlistRemoveResponse {
            id,
            removed,
            in_wishlist: false,
        }),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to remove wishlist entry");
            not_saved(&e)
        }
    }
}

/// DELETE /api/v1/wishlist
async fn clear_wishlist(state: web::Data<AppState>) -> impl Responder {
    let favorites = state.favorites.clone();

    match run_blocking(move || favorites.blocking_lock().clear()).await {
        Ok(cleared) => HttpResponse::Ok().json(WishlistClearedResponse { cleared }),
        Err(e) => {
            tracing::error!(error = %e, "failed to clear wishlist");
            not_saved(&e)
        }
    }
}
