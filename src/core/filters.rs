use crate::models::{Listing, QueryState};

/// Stage 1 - case-insensitive substring match on brand or model
///
/// An empty search matches every listing.
#[inline]
pub fn matches_search(listing: &Listing, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    listing.brand.to_lowercase().contains(&needle)
        || listing.model.to_lowercase().contains(&needle)
}

/// Stage 2 - exact brand match, `None` means all brands
#[inline]
pub fn matches_brand(listing: &Listing, brand: Option<&str>) -> bool {
    match brand {
        Some(brand) => listing.brand == brand,
        None => true,
    }
}

/// Stage 3 - inclusive price bounds
#[inline]
pub fn within_price_range(listing: &Listing, min_price: u32, max_price: u32) -> bool {
    listing.price >= min_price && listing.price <= max_price
}

/// Stage 4 - exact fuel type match, `None` means all fuel types
#[inline]
pub fn matches_fuel_type(listing: &Listing, fuel_type: Option<crate::models::FuelType>) -> bool {
    fuel_type.map_or(true, |f| listing.fuel_type == f)
}

/// Stage 5 - seating minimum, 0 disables the check
#[inline]
pub fn meets_seating(listing: &Listing, min_seating: u8) -> bool {
    listing.seating_capacity >= min_seating
}

/// Price within 20% either side of `reference`, bounds inclusive
#[inline]
pub fn within_price_band(listing: &Listing, reference: u32) -> bool {
    // 0.8 * ref <= price <= 1.2 * ref, scaled by 5 to stay in integers
    let price = u64::from(listing.price) * 5;
    let reference = u64::from(reference);
    price >= reference * 4 && price <= reference * 6
}

/// Same brand, same fuel type or a similar price
#[inline]
pub fn is_related(candidate: &Listing, listing: &Listing) -> bool {
    candidate.id != listing.id
        && (candidate.brand == listing.brand
            || candidate.fuel_type == listing.fuel_type
            || within_price_band(candidate, listing.price))
}

/// Run stages 1 through 5 in order
#[inline]
pub fn matches_query(listing: &Listing, query: &QueryState) -> bool {
    matches_search(listing, &query.search)
        && matches_brand(listing, query.brand.as_deref())
        && within_price_range(listing, query.min_price, query.max_price)
        && matches_fuel_type(listing, query.fuel_type)
        && meets_seating(listing, query.min_seating)
}
