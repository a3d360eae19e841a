//! Splits a generative model's free-text answer into its prose and the JSON
//! array embedded in it.
//!
//! The array is taken to run from the first `[` to the last `]` in the text.
//! Anything before the opening bracket is the narrative; anything after the
//! closing bracket is dropped. Stray brackets in the prose (citations,
//! markdown links) after the real array will corrupt the candidate and the
//! whole text falls back to narrative.
//!
//! Extraction never fails. A missing or malformed array only shows up as
//! `was_valid() == false` with no items, and the trimmed input as narrative.

use serde::de::DeserializeOwned;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// No `[` ... `]` pair in the text.
    NoArrayFound,
    /// A bracket pair was found but did not parse as an array of the expected type.
    MalformedArray,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::NoArrayFound => write!(f, "no array found"),
            ExtractionFailure::MalformedArray => write!(f, "malformed array"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    narrative: String,
    items: Vec<T>,
    failure: Option<ExtractionFailure>,
}

/// Place names pulled out of an itinerary response.
pub type ExtractionResult = Extraction<String>;

impl<T> Extraction<T> {
    fn fallback(raw_text: &str, failure: ExtractionFailure) -> Self {
        Self {
            narrative: raw_text.trim().to_string(),
            items: Vec::new(),
            failure: Some(failure),
        }
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn was_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<ExtractionFailure> {
        self.failure
    }

    pub fn into_parts(self) -> (String, Vec<T>) {
        (self.narrative, self.items)
    }
}

pub fn extract(raw_text: &str) -> ExtractionResult {
    extract_as(raw_text)
}

/// Same contract as [`extract`], with the array elements deserialized into `T`.
/// Any element that does not fit `T` rejects the whole array.
pub fn extract_as<T: DeserializeOwned>(raw_text: &str) -> Extraction<T> {
    let bounds = raw_text
        .find('[')
        .zip(raw_text.rfind(']'))
        .filter(|(open, close)| close > open);

    let Some((open, close)) = bounds else {
        return Extraction::fallback(raw_text, ExtractionFailure::NoArrayFound);
    };

    match serde_json::from_str::<Vec<T>>(&raw_text[open..=close]) {
        Ok(items) => Extraction {
            narrative: raw_text[..open].trim().to_string(),
            items,
            failure: None,
        },
        Err(_) => Extraction::fallback(raw_text, ExtractionFailure::MalformedArray),
    }
}
