use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A geocoded stop on the itinerary, as plotted on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceLocation {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub image_url: String,
}

impl PlaceLocation {
    pub fn new(name: &str, coordinates: Coordinates, image_url: String) -> Self {
        Self {
            name: name.to_string(),
            lon: coordinates.lon,
            lat: coordinates.lat,
            image_url,
        }
    }
}
