use log::warn;
use regex::Regex;
use reqwest::{header::REFERER, Client};
use serde::Deserialize;
use url::Url;

use crate::config::AppConfig;

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/6/65/No-Image-Placeholder.svg";

// DuckDuckGo hands out a per-query token in the search page that the image
// endpoint requires.
const SEARCH_TOKEN_PATTERN: &str = r#"vqd=["']?([\d-]+)["']?"#;

#[derive(Debug, Deserialize)]
struct PageSummary {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct ImageSearchResults {
    #[serde(default)]
    results: Vec<ImageSearchResult>,
}

#[derive(Debug, Deserialize)]
struct ImageSearchResult {
    image: String,
}

#[derive(Debug)]
pub enum ImageLookupError {
    HttpError(reqwest::Error),
    InvalidUrl(String),
    InvalidPattern(regex::Error),
    TokenNotFound,
    NoResults,
}

impl std::fmt::Display for ImageLookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageLookupError::HttpError(err) => write!(f, "HTTP error: {}", err),
            ImageLookupError::InvalidUrl(err) => write!(f, "Invalid URL: {}", err),
            ImageLookupError::InvalidPattern(err) => write!(f, "Invalid token pattern: {}", err),
            ImageLookupError::TokenNotFound => write!(f, "Image search token not found"),
            ImageLookupError::NoResults => write!(f, "Image search returned no results"),
        }
    }
}

impl std::error::Error for ImageLookupError {}

impl From<reqwest::Error> for ImageLookupError {
    fn from(err: reqwest::Error) -> Self {
        ImageLookupError::HttpError(err)
    }
}

/// Finds pictures for places (Wikipedia thumbnails) and hotels (DuckDuckGo
/// image search). Lookups never fail outward; they fall back to
/// [`PLACEHOLDER_IMAGE_URL`].
#[derive(Clone)]
pub struct ImageService {
    client: Client,
    wikipedia_base_url: String,
    duckduckgo_base_url: String,
    search_token: Regex,
}

impl ImageService {
    pub fn new(config: &AppConfig) -> Result<Self, ImageLookupError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        let search_token =
            Regex::new(SEARCH_TOKEN_PATTERN).map_err(ImageLookupError::InvalidPattern)?;

        Ok(Self {
            client,
            wikipedia_base_url: config.wikipedia_base_url.clone(),
            duckduckgo_base_url: config.duckduckgo_base_url.clone(),
            search_token,
        })
    }

    pub async fn place_image(&self, place: &str) -> String {
        match self.wikipedia_thumbnail(place).await {
            Ok(Some(url)) => url,
            Ok(None) => PLACEHOLDER_IMAGE_URL.to_string(),
            Err(e) => {
                warn!("Failed to fetch Wikipedia image for '{}': {}", place, e);
                PLACEHOLDER_IMAGE_URL.to_string()
            }
        }
    }

    pub async fn hotel_image(&self, hotel_name: &str, destination: &str) -> String {
        let query = format!("{} {} hotel", hotel_name, destination);
        match self.first_search_image(&query).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Failed to find image for '{}': {}", query, e);
                PLACEHOLDER_IMAGE_URL.to_string()
            }
        }
    }

    async fn wikipedia_thumbnail(&self, place: &str) -> Result<Option<String>, ImageLookupError> {
        let url = summary_url(&self.wikipedia_base_url, place)?;
        let response = self.client.get(url).send().await?;

        // Pages that don't exist are a normal outcome, not an error.
        if !response.status().is_success() {
            return Ok(None);
        }

        let summary: PageSummary = response.json().await?;
        Ok(summary.thumbnail.map(|thumbnail| thumbnail.source))
    }

    async fn first_search_image(&self, query: &str) -> Result<String, ImageLookupError> {
        let token = self.search_token_for(query).await?;
        let url = format!("{}/i.js", self.duckduckgo_base_url);

        let results: ImageSearchResults = self
            .client
            .get(&url)
            .query(&[
                ("l", "us-en"),
                ("o", "json"),
                ("q", query),
                ("vqd", token.as_str()),
                ("f", ",,,"),
                ("p", "1"),
            ])
            .header(REFERER, format!("{}/", self.duckduckgo_base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        results
            .results
            .into_iter()
            .next()
            .map(|result| result.image)
            .ok_or(ImageLookupError::NoResults)
    }

    async fn search_token_for(&self, query: &str) -> Result<String, ImageLookupError> {
        let page = self
            .client
            .get(format!("{}/", self.duckduckgo_base_url))
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        self.search_token
            .captures(&page)
            .and_then(|captures| captures.get(1))
            .map(|token| token.as_str().to_string())
            .ok_or(ImageLookupError::TokenNotFound)
    }
}

/// `{base}/api/rest_v1/page/summary/{Title_With_Underscores}`
fn summary_url(base_url: &str, place: &str) -> Result<Url, ImageLookupError> {
    let mut url = Url::parse(base_url).map_err(|e| ImageLookupError::InvalidUrl(e.to_string()))?;
    let title = place.trim().replace(' ', "_");

    url.path_segments_mut()
        .map_err(|_| ImageLookupError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(["api", "rest_v1", "page", "summary", title.as_str()]);

    Ok(url)
}
