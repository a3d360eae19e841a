use std::{env, fmt, time::Duration};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-pro-exp-02-05";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org";
const DEFAULT_DUCKDUCKGO_BASE_URL: &str = "https://duckduckgo.com";
const DEFAULT_GEOCODER_USER_AGENT: &str = "ai_travel_planner";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
const DEFAULT_GEOCODE_MAX_ATTEMPTS: u32 = 2;

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => {
                write!(f, "{} is missing! Please check your .env file.", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for the server and every outbound collaborator.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub nominatim_base_url: String,
    pub wikipedia_base_url: String,
    pub duckduckgo_base_url: String,
    pub geocoder_user_agent: String,
    pub http_timeout: Duration,
    pub generation_timeout: Duration,
    pub geocode_max_attempts: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any key lookup. Unparseable numbers fall back
    /// to their defaults, the same way `PORT` always has.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = lookup("GOOGLE_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingVar("GOOGLE_API_KEY"))?;

        let text = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let base_url = |name: &str, default: &str| text(name, default).trim_end_matches('/').to_string();
        let secs = |name: &str, default: u64| {
            let secs = lookup(name)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(default);
            Duration::from_secs(secs)
        };

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(PORT);
        let geocode_max_attempts = lookup("GEOCODE_MAX_ATTEMPTS")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_GEOCODE_MAX_ATTEMPTS)
            .max(1);

        Ok(Self {
            host: text("HOST", HOST),
            port,
            google_api_key,
            gemini_model: text("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: base_url("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            nominatim_base_url: base_url("NOMINATIM_BASE_URL", DEFAULT_NOMINATIM_BASE_URL),
            wikipedia_base_url: base_url("WIKIPEDIA_BASE_URL", DEFAULT_WIKIPEDIA_BASE_URL),
            duckduckgo_base_url: base_url("DUCKDUCKGO_BASE_URL", DEFAULT_DUCKDUCKGO_BASE_URL),
            geocoder_user_agent: text("GEOCODER_USER_AGENT", DEFAULT_GEOCODER_USER_AGENT),
            http_timeout: secs("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
            generation_timeout: secs("GENERATION_TIMEOUT_SECS", DEFAULT_GENERATION_TIMEOUT_SECS),
            geocode_max_attempts,
        })
    }

    pub fn masked_api_key(&self) -> String {
        let key = &self.google_api_key;
        if key.len() > 8 && key.is_ascii() {
            format!("{}***{}", &key[0..4], &key[key.len() - 4..])
        } else {
            "***".to_string()
        }
    }
}
