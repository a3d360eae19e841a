use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use log::warn;
use serde_json::json;

use crate::{app::AppState, models::trip::TripRequest};

/*
    /api/plans
*/
pub async fn create_plan(state: web::Data<AppState>, input: web::Json<TripRequest>) -> impl Responder {
    let request = input.into_inner();

    if let Err(e) = request.validate() {
        warn!("Rejected trip request: {}", e);
        return HttpResponse::BadRequest().json(json!({ "error": e.to_string() }));
    }

    let today = Local::now().date_naive();
    let plan = state.itinerary.plan_trip(&request, today).await;

    HttpResponse::Ok().json(plan)
}
