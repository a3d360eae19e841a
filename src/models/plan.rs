use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    hotel::HotelListing,
    location::PlaceLocation,
    trip::{
        Currency, TripTheme, DEFAULT_BUDGET, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MIN_BUDGET,
        MIN_DURATION_DAYS,
    },
};

pub const NO_HOTELS_WARNING: &str = "No budget hotels found.";
pub const NO_LOCATIONS_WARNING: &str = "Could not extract valid locations from the itinerary.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub source: String,
    pub destination: String,
    pub theme: TripTheme,
    pub currency: Currency,
    pub currency_symbol: String,
    pub summary: String,
    pub itinerary: String,
    pub places: Vec<String>,
    pub places_parsed: bool,
    pub hotels: Vec<HotelListing>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub locations: Vec<PlaceLocation>,
    pub failed_places: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_html: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrencyOption {
    pub code: &'static str,
    pub symbol: &'static str,
}

/// Form choices offered to clients.
#[derive(Debug, Serialize)]
pub struct TripOptions {
    pub currencies: Vec<CurrencyOption>,
    pub themes: Vec<TripTheme>,
    pub min_duration_days: u32,
    pub max_duration_days: u32,
    pub default_duration_days: u32,
    pub min_budget: u32,
    pub default_budget: u32,
}

impl Default for TripOptions {
    fn default() -> Self {
        Self {
            currencies: Currency::ALL
                .iter()
                .map(|currency| CurrencyOption {
                    code: currency.code(),
                    symbol: currency.symbol(),
                })
                .collect(),
            themes: TripTheme::ALL.to_vec(),
            min_duration_days: MIN_DURATION_DAYS,
            max_duration_days: MAX_DURATION_DAYS,
            default_duration_days: DEFAULT_DURATION_DAYS,
            min_budget: MIN_BUDGET,
            default_budget: DEFAULT_BUDGET,
        }
    }
}
