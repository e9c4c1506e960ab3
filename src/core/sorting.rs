use crate::models::{Listing, SortKey};

/// Stage 6 - order the filtered listings
///
/// Uses a stable sort, so listings that compare equal keep their input order.
/// `Relevance` leaves the input untouched.
pub fn sort_listings(listings: &mut [&Listing], sort: SortKey) {
    match sort {
        SortKey::Relevance => {}
        SortKey::PriceAsc => listings.sort_by_key(|l| l.price),
        SortKey::PriceDesc => listings.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::YearDesc => listings.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::YearAsc => listings.sort_by_key(|l| l.year),
    }
}
