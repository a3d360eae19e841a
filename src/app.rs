use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::{config::AppConfig, routes, services::itinerary_service::ItineraryService};

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    pub itinerary: ItineraryService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let itinerary = ItineraryService::new(&config)?;
        Ok(Self { config, itinerary })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .route("/options", web::get().to(routes::options::get_options))
                .route("/plans", web::post().to(routes::plan::create_plan))
                .route("/maps", web::post().to(routes::map::render_map)),
        );
}
