// Integration tests for Car Finder

use car_finder::core::Catalog;
use car_finder::models::{FilterChange, FuelType, Listing, QueryState, SortKey};
use car_finder::services::{shared, FavoritesStore, JsonStorage, ListingRepository, ListingSource, MemoryStorage, PreferenceStore};
use car_finder::Theme;
use std::time::Duration;

fn create_test_listing(id: u32, brand: &str, model: &str, price: u32, year: u16, seats: u8) -> Listing {
    Listing {
        id,
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        price,
        image: format!("/images/{}.jpg", id),
        fuel_type: FuelType::Gasoline,
        transmission: "Automatic".to_string(),
        mileage: 10_000,
        seating_capacity: seats,
        description: format!("{} {}", brand, model),
        features: vec!["Bluetooth".to_string(), "Cruise control".to_string()],
    }
}

fn three_listings() -> Vec<Listing> {
    vec![
        create_test_listing(1, "Honda", "Civic", 20_000, 2019, 5),
        create_test_listing(2, "Audi", "Q7", 80_000, 2022, 7),
        create_test_listing(3, "Toyota", "RAV4", 55_000, 2021, 5),
    ]
}

#[test]
fn test_min_price_then_price_asc() {
    let catalog = Catalog::default();
    let listings = three_listings();

    let query = QueryState::default().with(FilterChange::PriceRange { min: 25_000, max: 1_000_000 });
    let filtered = catalog.filter_and_sort(&listings, &query);
    let prices: Vec<u32> = filtered.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![80_000, 55_000]);

    let query = query.with(FilterChange::Sort(SortKey::PriceAsc));
    let sorted = catalog.filter_and_sort(&listings, &query);
    let prices: Vec<u32> = sorted.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![55_000, 80_000]);
}

#[test]
fn test_filtering_is_deterministic() {
    let catalog = Catalog::new(2);
    let listings = three_listings();
    let query = QueryState::default()
        .with(FilterChange::Search("o".to_string()))
        .with(FilterChange::Sort(SortKey::YearDesc));

    let first: Vec<u32> = catalog.browse(&listings, &query).listings.iter().map(|l| l.id).collect();
    for _ in 0..10 {
        let again: Vec<u32> = catalog.browse(&listings, &query).listings.iter().map(|l| l.id).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn test_seating_zero_is_unfiltered() {
    let catalog = Catalog::default();
    let listings = three_listings();
    let query = QueryState::default().with(FilterChange::MinSeating(0));

    assert_eq!(catalog.filter_and_sort(&listings, &query).len(), listings.len());
}

#[test]
fn test_full_price_range_is_unfiltered() {
    let catalog = Catalog::default();
    let listings = three_listings();
    let max = listings.iter().map(|l| l.price).max().unwrap();
    let query = QueryState::default().with(FilterChange::PriceRange { min: 0, max });

    assert_eq!(catalog.filter_and_sort(&listings, &query).len(), listings.len());
}

#[test]
fn test_filter_change_resets_page() {
    let mut query = QueryState::default();
    query.go_to_page(4);
    assert_eq!(query.page(), 4);

    query.apply(FilterChange::Brand(Some("Audi".to_string())));
    assert_eq!(query.page(), 1);

    query.go_to_page(2);
    query.apply(FilterChange::Sort(SortKey::YearAsc));
    assert_eq!(query.page(), 1);
}

#[test]
fn test_favorites_scenario() {
    let mut store = FavoritesStore::load(shared(MemoryStorage::new())).unwrap();
    let listing = create_test_listing(7, "Tesla", "Model 3", 42_000, 2023, 5);

    store.add(&listing).unwrap();
    assert!(store.contains(7));

    store.clear().unwrap();
    assert!(!store.contains(7));
    assert!(store.list().is_empty());
}

#[test]
fn test_favorites_persist_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wishlist.json");
    let listing = create_test_listing(2, "Audi", "Q7", 80_000, 2022, 7);

    {
        let storage = shared(JsonStorage::open(&path).unwrap());
        let mut store = FavoritesStore::load(storage.clone()).unwrap();
        store.add(&listing).unwrap();
        store.add(&listing).unwrap();
        PreferenceStore::new(storage).save(Theme::Dark).unwrap();
    }

    let storage = shared(JsonStorage::open(&path).unwrap());
    let store = FavoritesStore::load(storage.clone()).unwrap();
    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].listing, listing);

    let theme = PreferenceStore::new(storage).load().unwrap().unwrap();
    assert_eq!(theme.theme, Theme::Dark);
}

#[tokio::test]
async fn test_detail_lookup_not_found() {
    let repo = ListingRepository::new(ListingSource::Embedded, Duration::from_secs(60));
    let found = repo.get_by_id(999_999).await;
    assert!(matches!(found, Ok(None)));
}

#[tokio::test]
async fn test_remote_source() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::to_string(&three_listings()).unwrap();
    let mock = server
        .mock("GET", "/api/cars")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let source = ListingSource::remote(format!("{}/api/cars", server.url()), Duration::from_secs(5)).unwrap();
    let repo = ListingRepository::new(source, Duration::from_secs(60));

    assert_eq!(repo.get_all().await.unwrap().len(), 3);
    // Second call is served from the cache
    assert_eq!(repo.get_by_id(3).await.unwrap().unwrap().model, "RAV4");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_failure_is_retryable() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/api/cars")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let source = ListingSource::remote(format!("{}/api/cars", server.url()), Duration::from_secs(5)).unwrap();
    let repo = ListingRepository::new(source, Duration::from_secs(60));
    assert!(repo.get_all().await.is_err());
    failing.assert_async().await;
    failing.remove_async().await;

    server
        .mock("GET", "/api/cars")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    assert!(repo.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_cold_loads_share_one_fetch() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::to_string(&three_listings()).unwrap();
    let mock = server
        .mock("GET", "/api/cars")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let source = ListingSource::remote(format!("{}/api/cars", server.url()), Duration::from_secs(5)).unwrap();
    let repo = ListingRepository::new(source, Duration::from_secs(60));

    let (a, b, c) = tokio::join!(repo.get_all(), repo.get_all(), repo.get_by_id(2));
    assert_eq!(a.unwrap().len(), 3);
    assert_eq!(b.unwrap().len(), 3);
    assert_eq!(c.unwrap().unwrap().brand, "Audi");
    mock.assert_async().await;
}
