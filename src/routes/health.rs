use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::app::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    /health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;

    let mut services = HashMap::new();
    services.insert(
        "generation".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Model {} configured ({})",
                config.gemini_model,
                config.masked_api_key()
            )),
        },
    );
    services.insert(
        "geocoding".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "{} (max {} attempt(s))",
                config.nominatim_base_url, config.geocode_max_attempts
            )),
        },
    );
    services.insert(
        "images".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "{}, {}",
                config.wikipedia_base_url, config.duckduckgo_base_url
            )),
        },
    );

    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
