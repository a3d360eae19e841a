use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::config::AppConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its parts joined.
    pub fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug)]
pub enum GenerationError {
    HttpError(reqwest::Error),
    ApiError(String),
    ResponseError(String),
    EmptyResponse,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GenerationError::ApiError(msg) => write!(f, "Generation API error: {}", msg),
            GenerationError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            GenerationError::EmptyResponse => write!(f, "Generation API returned no text"),
        }
    }
}

impl Error for GenerationError {}

// Request URLs stay out of error messages since those end up in the logs.
impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::HttpError(err.without_url())
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GenerationService {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GenerationService {
    pub fn new(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.generation_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            api_key: config.google_api_key.clone(),
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!("Requesting generation from model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::ApiError(format!(
                "{}: {}",
                status, response_text
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| GenerationError::ResponseError(format!("Failed to parse response: {}", e)))?;

        parsed.text().ok_or(GenerationError::EmptyResponse)
    }
}
