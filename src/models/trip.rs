use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;
pub const MIN_BUDGET: u32 = 50;
pub const DEFAULT_DURATION_DAYS: u32 = 3;
pub const DEFAULT_BUDGET: u32 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Inr,
    Gbp,
    Jpy,
    Aud,
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Inr,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Aud => "A$",
            Currency::Cad => "C$",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripTheme {
    #[default]
    Adventure,
    History,
    Food,
    Nature,
    Romantic,
    Luxury,
    Backpacking,
}

impl TripTheme {
    pub const ALL: [TripTheme; 7] = [
        TripTheme::Adventure,
        TripTheme::History,
        TripTheme::Food,
        TripTheme::Nature,
        TripTheme::Romantic,
        TripTheme::Luxury,
        TripTheme::Backpacking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripTheme::Adventure => "Adventure",
            TripTheme::History => "History",
            TripTheme::Food => "Food",
            TripTheme::Nature => "Nature",
            TripTheme::Romantic => "Romantic",
            TripTheme::Luxury => "Luxury",
            TripTheme::Backpacking => "Backpacking",
        }
    }
}

fn default_duration_days() -> u32 {
    DEFAULT_DURATION_DAYS
}

fn default_budget() -> u32 {
    DEFAULT_BUDGET
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub source: String,
    pub destination: String,
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,
    #[serde(default = "default_budget")]
    pub budget: u32,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub theme: TripTheme,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TripRequestError {
    MissingDestination,
    DurationOutOfRange(u32),
    BudgetTooLow(u32),
}

impl fmt::Display for TripRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripRequestError::MissingDestination => write!(f, "Destination is required"),
            TripRequestError::DurationOutOfRange(days) => write!(
                f,
                "Duration must be between {} and {} days, got {}",
                MIN_DURATION_DAYS, MAX_DURATION_DAYS, days
            ),
            TripRequestError::BudgetTooLow(budget) => {
                write!(f, "Budget must be at least {}, got {}", MIN_BUDGET, budget)
            }
        }
    }
}

impl std::error::Error for TripRequestError {}

impl TripRequest {
    pub fn validate(&self) -> Result<(), TripRequestError> {
        if self.destination.trim().is_empty() {
            return Err(TripRequestError::MissingDestination);
        }
        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(TripRequestError::DurationOutOfRange(self.duration_days));
        }
        if self.budget < MIN_BUDGET {
            return Err(TripRequestError::BudgetTooLow(self.budget));
        }
        Ok(())
    }
}
