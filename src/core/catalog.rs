use std::collections::BTreeSet;
use crate::models::{FuelType, Listing, QueryState};
use crate::core::{
    filters::{is_related, matches_query},
    pagination::{page_slice, total_pages, DEFAULT_PAGE_SIZE},
    sorting::sort_listings,
};

/// Result of a browse pass
#[derive(Debug)]
pub struct BrowseResult {
    pub listings: Vec<Listing>,
    pub total_results: usize,
    pub page: u32,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Distinct filter values found in a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    pub brands: Vec<String>,
    pub fuel_types: Vec<FuelType>,
}

/// Browse orchestrator - runs the filter/sort/paginate pipeline
///
/// # Pipeline Stages
/// 1. Text search on brand/model
/// 2. Brand
/// 3. Price range
/// 4. Fuel type
/// 5. Seating minimum
/// 6. Sort
/// 7. Page slice
#[derive(Debug, Clone)]
pub struct Catalog {
    page_size: usize,
}

impl Catalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filter and sort without paginating
    ///
    /// Pure function of its inputs: identical arguments give identical output.
    pub fn filter_and_sort<'a>(&self, listings: &'a [Listing], query: &QueryState) -> Vec<&'a Listing> {
        let mut matched: Vec<&Listing> = listings
            .iter()
            .filter(|listing| matches_query(listing, query))
            .collect();

        sort_listings(&mut matched, query.sort);
        matched
    }

    /// Run the full pipeline and return one page
    ///
    /// # Arguments
    /// * `listings` - The full collection, in dataset order
    /// * `query` - Active filters, sort and page
    pub fn browse(&self, listings: &[Listing], query: &QueryState) -> BrowseResult {
        let matched = self.filter_and_sort(listings, query);
        let total_results = matched.len();

        let page = page_slice(&matched, query.page(), self.page_size)
            .iter()
            .map(|listing| (*listing).clone())
            .collect();

        BrowseResult {
            listings: page,
            total_results,
            page: query.page(),
            page_size: self.page_size,
            total_pages: total_pages(total_results, self.page_size),
        }
    }

    /// Sorted distinct brands and fuel types of the whole collection
    pub fn facets(&self, listings: &[Listing]) -> Facets {
        let brands: BTreeSet<&str> = listings.iter().map(|l| l.brand.as_str()).collect();
        let fuel_types: BTreeSet<FuelType> = listings.iter().map(|l| l.fuel_type).collect();

        Facets {
            brands: brands.into_iter().map(str::to_string).collect(),
            fuel_types: fuel_types.into_iter().collect(),
        }
    }

    /// Look up a single listing by id
    pub fn find<'a>(&self, listings: &'a [Listing], id: u32) -> Option<&'a Listing> {
        listings.iter().find(|l| l.id == id)
    }

    /// Up to `limit` other listings that share a brand or fuel type with
    /// `listing`, or cost within 20% of it. Dataset order is kept.
    pub fn related<'a>(&self, listings: &'a [Listing], listing: &Listing, limit: usize) -> Vec<&'a Listing> {
        listings
            .iter()
            .filter(|candidate| is_related(candidate, listing))
            .take(limit)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterChange, SortKey};

    fn create_listing(id: u32, brand: &str, price: u32, fuel_type: FuelType) -> Listing {
        Listing {
            id,
            brand: brand.to_string(),
            model: format!("Model {}", id),
            year: 2015 + (id % 8) as u16,
            price,
            image: String::new(),
            fuel_type,
            transmission: "Automatic".to_string(),
            mileage: id * 1_000,
            seating_capacity: 5,
            description: String::new(),
            features: vec![],
        }
    }

    #[test]
    fn test_browse_filters_and_sorts() {
        let catalog = Catalog::default();
        let listings = vec![
            create_listing(1, "Ford", 20_000, FuelType::Gasoline),
            create_listing(2, "Tesla", 80_000, FuelType::Electric),
            create_listing(3, "Ford", 55_000, FuelType::Hybrid),
        ];

        let query = QueryState::default()
            .with(FilterChange::PriceRange { min: 25_000, max: 1_000_000 })
            .with(FilterChange::Sort(SortKey::PriceAsc));
        let result = catalog.browse(&listings, &query);

        let prices: Vec<u32> = result.listings.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![55_000, 80_000]);
        assert_eq!(result.total_results, 2);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_browse_paginates() {
        let catalog = Catalog::new(10);
        let listings: Vec<Listing> = (1..=23)
            .map(|i| create_listing(i, "Ford", 10_000 + i, FuelType::Gasoline))
            .collect();

        let mut query = QueryState::default();
        query.go_to_page(3);
        let result = catalog.browse(&listings, &query);

        assert_eq!(result.total_results, 23);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.listings.len(), 3);
        assert_eq!(result.listings[0].id, 21);
    }

    #[test]
    fn test_facets_sorted_and_distinct() {
        let catalog = Catalog::default();
        let listings = vec![
            create_listing(1, "Tesla", 80_000, FuelType::Electric),
            create_listing(2, "Ford", 20_000, FuelType::Gasoline),
            create_listing(3, "Ford", 55_000, FuelType::Electric),
        ];

        let facets = catalog.facets(&listings);
        assert_eq!(facets.brands, vec!["Ford", "Tesla"]);
        assert_eq!(facets.fuel_types, vec![FuelType::Electric, FuelType::Gasoline]);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::default();
        let listings = vec![create_listing(7, "Ford", 20_000, FuelType::Gasoline)];
        assert!(catalog.find(&listings, 7).is_some());
        assert!(catalog.find(&listings, 8).is_none());
    }

    #[test]
    fn test_related_price_band_is_inclusive() {
        let catalog = Catalog::default();
        let target = create_listing(1, "Ford", 50_000, FuelType::Gasoline);
        let listings = vec![
            target.clone(),
            create_listing(2, "Kia", 39_999, FuelType::Diesel),
            create_listing(3, "Kia", 40_000, FuelType::Diesel),
            create_listing(4, "Kia", 60_000, FuelType::Diesel),
            create_listing(5, "Kia", 60_001, FuelType::Diesel),
        ];

        let ids: Vec<u32> = catalog.related(&listings, &target, 4).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_related_excludes_self_and_respects_limit() {
        let catalog = Catalog::default();
        let target = create_listing(3, "Tesla", 80_000, FuelType::Electric);
        let listings: Vec<Listing> = (1..=8)
            .map(|i| create_listing(i, "Tesla", 10_000 * i, FuelType::Gasoline))
            .collect();

        let related = catalog.related(&listings, &target, 4);
        let ids: Vec<u32> = related.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);

        let lone = create_listing(9, "Lada", 1_000, FuelType::Hybrid);
        assert!(catalog.related(&listings, &lone, 4).is_empty());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        assert_eq!(Catalog::new(0).page_size(), 1);
    }
}
