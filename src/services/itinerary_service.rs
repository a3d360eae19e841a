use chrono::{Days, NaiveDate};
use futures::future::join_all;
use log::{error, info, warn};

use crate::config::AppConfig;
use crate::models::{
    hotel::{HotelListing, HotelSuggestion},
    location::PlaceLocation,
    plan::{TripPlan, NO_HOTELS_WARNING, NO_LOCATIONS_WARNING},
    trip::TripRequest,
};
use crate::services::{
    generation_service::GenerationService,
    geocoding_service::GeocodingService,
    image_service::ImageService,
    map_service::render_map_page,
    response_extractor::{extract, extract_as, Extraction},
};

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate itinerary.";
const SUMMARY_CHARS: usize = 200;

/// Narrative and place list pulled from the itinerary response.
#[derive(Debug, Clone)]
pub struct ItineraryDraft {
    pub narrative: String,
    pub places: Vec<String>,
    pub places_parsed: bool,
}

pub fn itinerary_prompt(request: &TripRequest) -> String {
    format!(
        r#"
    Plan a {duration}-day trip from {source} to {destination} within {budget} {currency}.
    The trip should be themed as **{theme}**.

    Provide:
    - A detailed itinerary with day-wise places to visit.
    - A JSON list of place names (excluding source) that will be visited.
    Output format:

    [ "Place1", "Place2", "Place3", "Place4" ]
    "#,
        duration = request.duration_days,
        source = request.source.trim(),
        destination = request.destination.trim(),
        budget = request.budget,
        currency = request.currency.code(),
        theme = request.theme.as_str(),
    )
}

pub fn hotels_prompt(request: &TripRequest) -> String {
    format!(
        r#"
    Suggest 5 budget-friendly hotels or Airbnbs near {destination} that fit within {budget} {currency} per night.
    Provide output in JSON format:

    [
        {{"name": "Hotel1", "price": 100, "location": "Area1"}},
        {{"name": "Hotel2", "price": 80, "location": "Area2"}},
        {{"name": "Hotel3", "price": 120, "location": "Area3"}},
        {{"name": "Hotel4", "price": 100, "location": "Area4"}},
        {{"name": "Hotel5", "price": 200, "location": "Area5"}}
    ]
    "#,
        destination = request.destination.trim(),
        budget = request.budget,
        currency = request.currency.code(),
    )
}

/// The first 200 characters of the narrative followed by `...`.
pub fn summarize(narrative: &str) -> String {
    let head: String = narrative.chars().take(SUMMARY_CHARS).collect();
    format!("{}...", head)
}

pub struct ItineraryService {
    generator: GenerationService,
    geocoder: GeocodingService,
    images: ImageService,
}

impl ItineraryService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            generator: GenerationService::new(config)?,
            geocoder: GeocodingService::new(config)?,
            images: ImageService::new(config)?,
        })
    }

    /// Runs the whole flow for one request: itinerary, hotels, geocoding and
    /// the map. Upstream failures leave gaps in the plan plus a warning; they
    /// never fail the request.
    pub async fn plan_trip(&self, request: &TripRequest, today: NaiveDate) -> TripPlan {
        info!(
            "Planning a {} trip from '{}' to '{}'",
            request.theme.as_str(),
            request.source,
            request.destination
        );

        let draft = self.plan_itinerary(request).await;

        let hotels = self.suggest_hotels(request).await;
        let hotels = self.hotel_listings(request, hotels).await;

        let (locations, failed_places) = self.locate_places(&draft.places).await;
        let map_html = render_map_page(&locations);

        let mut warnings = Vec::new();
        if hotels.is_empty() {
            warnings.push(NO_HOTELS_WARNING.to_string());
        }
        if locations.is_empty() {
            warnings.push(NO_LOCATIONS_WARNING.to_string());
        }

        let check_out = today
            .checked_add_days(Days::new(request.duration_days.into()))
            .unwrap_or(today);

        TripPlan {
            source: request.source.clone(),
            destination: request.destination.clone(),
            theme: request.theme,
            currency: request.currency,
            currency_symbol: request.currency.symbol().to_string(),
            summary: summarize(&draft.narrative),
            itinerary: draft.narrative,
            places: draft.places,
            places_parsed: draft.places_parsed,
            hotels,
            check_in: today,
            check_out,
            locations,
            failed_places,
            map_html,
            warnings,
        }
    }

    pub async fn plan_itinerary(&self, request: &TripRequest) -> ItineraryDraft {
        let text = match self.generator.generate(&itinerary_prompt(request)).await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to generate itinerary: {}", e);
                return ItineraryDraft {
                    narrative: GENERATION_FAILED_MESSAGE.to_string(),
                    places: Vec::new(),
                    places_parsed: false,
                };
            }
        };

        let extraction = extract(&text);
        if let Some(failure) = extraction.failure() {
            warn!("Itinerary response had no usable place list: {}", failure);
        }

        let places_parsed = extraction.was_valid();
        let (narrative, places) = extraction.into_parts();

        ItineraryDraft {
            narrative,
            places,
            places_parsed,
        }
    }

    pub async fn suggest_hotels(&self, request: &TripRequest) -> Vec<HotelSuggestion> {
        let text = match self.generator.generate(&hotels_prompt(request)).await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to generate hotel suggestions: {}", e);
                return Vec::new();
            }
        };

        let extraction: Extraction<HotelSuggestion> = extract_as(&text);
        if let Some(failure) = extraction.failure() {
            warn!("Hotel response had no usable hotel list: {}", failure);
        }

        extraction.into_parts().1
    }

    pub async fn hotel_listings(
        &self,
        request: &TripRequest,
        hotels: Vec<HotelSuggestion>,
    ) -> Vec<HotelListing> {
        let destination = request.destination.trim();
        let futures = hotels.into_iter().map(|hotel| async move {
            let image_url = self.images.hotel_image(&hotel.name, destination).await;
            HotelListing::new(hotel, request.currency, image_url)
        });

        join_all(futures).await
    }

    /// Geocodes each place in order. Places the geocoder can't resolve are
    /// returned separately, also in order.
    pub async fn locate_places(&self, places: &[String]) -> (Vec<PlaceLocation>, Vec<String>) {
        let mut locations = Vec::new();
        let mut failed_places = Vec::new();

        for place in places {
            match self.geocoder.geocode(place).await {
                Ok(Some(coordinates)) => {
                    let image_url = self.images.place_image(place).await;
                    locations.push(PlaceLocation::new(place, coordinates, image_url));
                }
                Ok(None) => failed_places.push(place.clone()),
                Err(e) => {
                    warn!("Failed to geocode '{}': {}", place, e);
                    failed_places.push(place.clone());
                }
            }
        }

        (locations, failed_places)
    }
}
