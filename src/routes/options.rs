use actix_web::{HttpResponse, Responder};

use crate::models::plan::TripOptions;

/*
    /api/options
*/
pub async fn get_options() -> impl Responder {
    HttpResponse::Ok().json(TripOptions::default())
}
