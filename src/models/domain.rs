use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single vehicle in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u32,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub price: u32,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "fuelType")]
    pub fuel_type: FuelType,
    pub transmission: String,
    pub mileage: u32,
    #[serde(rename = "seatingCapacity")]
    pub seating_capacity: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Listing {
    /// Listings from this year or last year are flagged as new models
    pub fn is_new_model(&self, current_year: i32) -> bool {
        i32::from(self.year) >= current_year - 1
    }

    /// "Brand Model" label used in log lines and responses
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelType {
    Diesel,
    Electric,
    Gasoline,
    Hybrid,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gasoline" => Ok(FuelType::Gasoline),
            "diesel" => Ok(FuelType::Diesel),
            "electric" => Ok(FuelType::Electric),
            "hybrid" => Ok(FuelType::Hybrid),
            other => Err(format!(
                "unknown fuel type '{}', expected one of: Gasoline, Diesel, Electric, Hybrid",
                other
            )),
        }
    }
}

/// A listing snapshot saved to the wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(rename = "savedAt")]
    pub saved_at: chrono::DateTime<chrono::Utc>,
}

impl FavoriteEntry {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            saved_at: chrono::Utc::now(),
        }
    }

    pub fn id(&self) -> u32 {
        self.listing.id
    }
}

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{}', expected light, dark or system", other)),
        }
    }
}

/// Persisted theme preference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub theme: Theme,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Sort order for browse results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the dataset order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    YearDesc,
    YearAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::YearDesc => "year-desc",
            SortKey::YearAsc => "year-asc",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "relevance" => Ok(SortKey::Relevance),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "year-desc" => Ok(SortKey::YearDesc),
            "year-asc" => Ok(SortKey::YearAsc),
            other => Err(format!(
                "unknown sort '{}', expected relevance, price-asc, price-desc, year-desc or year-asc",
                other
            )),
        }
    }
}

/// Upper price bound used when no maximum is requested
pub const DEFAULT_MAX_PRICE: u32 = 1_000_000;

/// Active filter, sort and page parameters for a browse request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    pub search: String,
    pub brand: Option<String>,
    pub min_price: u32,
    pub max_price: u32,
    pub fuel_type: Option<FuelType>,
    pub min_seating: u8,
    pub sort: SortKey,
    page: u32,
}

/// A single change to the browse filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    Brand(Option<String>),
    PriceRange { min: u32, max: u32 },
    FuelType(Option<FuelType>),
    MinSeating(u8),
    Sort(SortKey),
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            brand: None,
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            fuel_type: None,
            min_seating: 0,
            sort: SortKey::Relevance,
            page: 1,
        }
    }
}

impl QueryState {
    /// Current 1-based page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Apply a filter or sort change. The page always goes back to 1.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Search(search) => self.search = search,
            FilterChange::Brand(brand) => {
                self.brand = brand.filter(|b| !b.is_empty() && b != "all")
            }
            FilterChange::PriceRange { min, max } => {
                self.min_price = min;
                self.max_price = max;
            }
            FilterChange::FuelType(fuel_type) => self.fuel_type = fuel_type,
            FilterChange::MinSeating(seats) => self.min_seating = seats,
            FilterChange::Sort(sort) => self.sort = sort,
        }
        self.page = 1;
    }

    /// Builder form of [`QueryState::apply`]
    pub fn with(mut self, change: FilterChange) -> Self {
        self.apply(change);
        self
    }

    /// Move to another page without touching the filters. Page 0 is clamped to 1.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}
