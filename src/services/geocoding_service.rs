//! Place-name geocoding against Nominatim (OpenStreetMap).
//!
//! A timed-out lookup is retried immediately, up to the configured attempt
//! count. Other failures are returned on the first attempt.

use log::{debug, warn};
use reqwest::{header::USER_AGENT, Client};
use serde::Deserialize;
use std::error::Error;
use std::fmt;

use crate::config::AppConfig;
use crate::models::location::Coordinates;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

#[derive(Debug)]
pub enum GeocodingError {
    HttpError(reqwest::Error),
    TimedOut { attempts: u32 },
    ResponseError(String),
}

impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodingError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GeocodingError::TimedOut { attempts } => {
                write!(f, "Geocoder timed out after {} attempt(s)", attempts)
            }
            GeocodingError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for GeocodingError {}

impl From<reqwest::Error> for GeocodingError {
    fn from(err: reqwest::Error) -> Self {
        GeocodingError::HttpError(err)
    }
}

#[derive(Clone)]
pub struct GeocodingService {
    client: Client,
    base_url: String,
    user_agent: String,
    max_attempts: u32,
}

impl GeocodingService {
    pub fn new(config: &AppConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.nominatim_base_url.clone(),
            user_agent: config.geocoder_user_agent.clone(),
            max_attempts: config.geocode_max_attempts.max(1),
        })
    }

    /// `Ok(None)` when the geocoder has no match for `place`.
    pub async fn geocode(&self, place: &str) -> Result<Option<Coordinates>, GeocodingError> {
        let mut attempt = 1;
        loop {
            match self.lookup(place).await {
                Err(GeocodingError::HttpError(err)) if err.is_timeout() => {
                    if attempt >= self.max_attempts {
                        return Err(GeocodingError::TimedOut { attempts: attempt });
                    }
                    warn!(
                        "Geocoding '{}' timed out (attempt {}/{}), retrying",
                        place, attempt, self.max_attempts
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn lookup(&self, place: &str) -> Result<Option<Coordinates>, GeocodingError> {
        let url = format!("{}/search", self.base_url);

        let places: Vec<NominatimPlace> = self
            .client
            .get(&url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(found) = places.into_iter().next() else {
            debug!("No geocoding match for '{}'", place);
            return Ok(None);
        };

        parse_coordinates(&found.lat, &found.lon).map(Some)
    }
}

fn parse_coordinates(lat: &str, lon: &str) -> Result<Coordinates, GeocodingError> {
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodingError::ResponseError(format!("Invalid latitude '{}': {}", lat, e)))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodingError::ResponseError(format!("Invalid longitude '{}': {}", lon, e)))?;

    Ok(Coordinates { lat, lon })
}
