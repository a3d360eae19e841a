use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use serde_json::json;

use crate::{models::location::PlaceLocation, services::map_service::render_map_page};

/*
    /api/maps
*/
pub async fn render_map(input: web::Json<Vec<PlaceLocation>>) -> impl Responder {
    match render_map_page(&input) {
        Some(page) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(page),
        None => HttpResponse::NotFound().json(json!({ "error": "No locations to plot" })),
    }
}
