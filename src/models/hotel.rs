use serde::{Deserialize, Serialize};

use crate::models::trip::Currency;

const HOTEL_SEARCH_URL: &str = "https://www.google.com/search";

/// Models answer with `120`, `"120"` or `"$120"` interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HotelPrice {
    Amount(f64),
    Text(String),
}

impl HotelPrice {
    /// Price with the currency symbol in front, unless the text already
    /// carries one.
    pub fn label(&self, currency: Currency) -> String {
        match self {
            HotelPrice::Amount(amount) => format!("{}{}", currency.symbol(), amount),
            HotelPrice::Text(text) => {
                let text = text.trim();
                if text.starts_with(|c: char| c.is_ascii_digit()) {
                    format!("{}{}", currency.symbol(), text)
                } else {
                    text.to_string()
                }
            }
        }
    }
}

/// One entry of the model's hotel suggestion array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelSuggestion {
    pub name: String,
    pub price: HotelPrice,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelListing {
    pub name: String,
    pub price: HotelPrice,
    pub price_label: String,
    pub location: String,
    pub image_url: String,
    pub link: String,
}

impl HotelListing {
    pub fn new(hotel: HotelSuggestion, currency: Currency, image_url: String) -> Self {
        let price_label = format!("{} per night", hotel.price.label(currency));
        let link = search_link(&hotel.name);

        Self {
            name: hotel.name,
            price: hotel.price,
            price_label,
            location: hotel.location,
            image_url,
            link,
        }
    }
}

fn search_link(name: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("{}?q={}", HOTEL_SEARCH_URL, query)
}
