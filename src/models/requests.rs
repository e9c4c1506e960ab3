use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{FilterChange, FuelType, QueryState, SortKey, Theme, DEFAULT_MAX_PRICE};

/// Browse query string
///
/// GET /api/v1/cars/search?search=&brand=&minPrice=&maxPrice=&fuelType=&seating=&sort=&page=
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_price_range"))]
pub struct BrowseParams {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, alias = "min_price", rename = "minPrice")]
    pub min_price: Option<u32>,
    #[serde(default, alias = "max_price", rename = "maxPrice")]
    pub max_price: Option<u32>,
    #[serde(default, alias = "fuel_type", rename = "fuelType")]
    pub fuel_type: Option<String>,
    /// Minimum seats, or "any"
    #[serde(default)]
    pub seating: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub page: Option<u32>,
}

fn validate_price_range(params: &BrowseParams) -> Result<(), ValidationError> {
    let min = params.min_price.unwrap_or(0);
    let max = params.max_price.unwrap_or(DEFAULT_MAX_PRICE);
    if min > max {
        let mut err = ValidationError::new("price_range");
        err.message = Some("minPrice must not exceed maxPrice".into());
        return Err(err);
    }
    Ok(())
}

impl BrowseParams {
    /// Convert raw parameters into a [`QueryState`]
    ///
    /// Returns a message describing the first unparseable value.
    pub fn to_query_state(&self) -> Result<QueryState, String> {
        let fuel_type = match self.fuel_type.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(v) => Some(v.parse::<FuelType>()?),
        };

        let min_seating = match self.seating.as_deref().map(str::trim) {
            None | Some("") | Some("any") => 0,
            Some(v) => v
                .parse::<u8>()
                .map_err(|_| format!("invalid seating '{}', expected a number or 'any'", v))?,
        };

        let sort = self.sort.as_deref().map(str::trim).unwrap_or("").parse::<SortKey>()?;

        let mut state = QueryState::default()
            .with(FilterChange::Search(self.search.clone().unwrap_or_default()))
            .with(FilterChange::Brand(self.brand.clone()))
            .with(FilterChange::PriceRange {
                min: self.min_price.unwrap_or(0),
                max: self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
            })
            .with(FilterChange::FuelType(fuel_type))
            .with(FilterChange::MinSeating(min_seating))
            .with(FilterChange::Sort(sort));

        state.go_to_page(self.page.unwrap_or(1));
        Ok(state)
    }
}

/// Request to add a listing to the wishlist
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    #[validate(range(min = 1))]
    pub id: u32,
}

/// Request to save the theme preference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveThemeRequest {
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_give_default_state() {
        let state = BrowseParams::default().to_query_state().unwrap();
        assert_eq!(state, QueryState::default());
    }

    #[test]
    fn test_sentinels_are_ignored() {
        let params = BrowseParams {
            brand: Some("all".to_string()),
            fuel_type: Some("all".to_string()),
            seating: Some("any".to_string()),
            ..Default::default()
        };
        let state = params.to_query_state().unwrap();
        assert_eq!(state.brand, None);
        assert_eq!(state.fuel_type, None);
        assert_eq!(state.min_seating, 0);
    }

    #[test]
    fn test_page_survives_conversion() {
        let params = BrowseParams {
            brand: Some("Tesla".to_string()),
            page: Some(3),
            ..Default::default()
        };
        let state = params.to_query_state().unwrap();
        assert_eq!(state.page(), 3);
        assert_eq!(state.brand.as_deref(), Some("Tesla"));
    }

    #[test]
    fn test_bad_values_rejected() {
        let params = BrowseParams {
            fuel_type: Some("steam".to_string()),
            ..Default::default()
        };
        assert!(params.to_query_state().is_err());

        let params = BrowseParams {
            seating: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(params.to_query_state().is_err());

        let params = BrowseParams {
            sort: Some("random".to_string()),
            ..Default::default()
        };
        assert!(params.to_query_state().is_err());
    }

    #[test]
    fn test_inverted_price_range_fails_validation() {
        let params = BrowseParams {
            min_price: Some(50_000),
            max_price: Some(10_000),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_page_fails_validation() {
        let params = BrowseParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_sentinels_are_case_sensitive() {
        let params = BrowseParams {
            brand: Some("All".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query_state().unwrap().brand.as_deref(), Some("All"));

        let params = BrowseParams {
            fuel_type: Some("ALL".to_string()),
            ..Default::default()
        };
        assert!(params.to_query_state().is_err());
    }

    #[test]
    fn test_search_is_kept_verbatim() {
        let params = BrowseParams {
            search: Some(" 3".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query_state().unwrap().search, " 3");
    }
}
