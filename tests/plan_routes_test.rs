mod common;

use actix_web::test;
use chrono::NaiveDate;
use serde_json::json;

use common::{FakeScript, TestApp, EIFFEL_TOWER_THUMBNAIL, HOTEL_IMAGE};
use trip_planner_api::services::image_service::PLACEHOLDER_IMAGE_URL;

const ITINERARY: &str = "Day 1: Eiffel Tower at sunset.\nDay 2: Louvre Museum, then a walk.\n\n\
[\"Eiffel Tower\", \"Louvre Museum\", \"Atlantis\"]\n\nHave a great trip!";

const HOTELS: &str = "Here are some options:\n[\
{\"name\": \"Hotel Lutetia\", \"price\": 120, \"location\": \"Saint-Germain\"},\
{\"name\": \"Generator Paris\", \"price\": 55.5, \"location\": \"Canal Saint-Martin\"},\
{\"name\": \"Hotel Caron\", \"price\": \"€80\", \"location\": \"Le Marais\"}]";

fn script(itinerary: Option<&str>, hotels: Option<&str>) -> FakeScript {
    FakeScript {
        itinerary_text: itinerary.map(str::to_string),
        hotels_text: hotels.map(str::to_string),
        ..Default::default()
    }
}

#[actix_rt::test]
async fn test_full_plan() {
    let test_app = TestApp::new(script(Some(ITINERARY), Some(HOTELS))).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plans")
        .set_json(&json!({
            "source": "London",
            "destination": "Paris",
            "duration_days": 2,
            "budget": 900,
            "currency": "EUR",
            "theme": "Romantic"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(
        body["itinerary"],
        "Day 1: Eiffel Tower at sunset.\nDay 2: Louvre Museum, then a walk."
    );
    assert!(body["summary"].as_str().unwrap().ends_with("..."));
    assert_eq!(body["places_parsed"], true);
    assert_eq!(body["places"], json!(["Eiffel Tower", "Louvre Museum", "Atlantis"]));
    assert_eq!(body["currency_symbol"], "€");

    let locations = body["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0]["name"], "Eiffel Tower");
    assert_eq!(locations[0]["lat"], 48.8582602);
    assert_eq!(locations[0]["image_url"], EIFFEL_TOWER_THUMBNAIL);
    assert_eq!(locations[1]["name"], "Louvre Museum");
    assert_eq!(locations[1]["image_url"], PLACEHOLDER_IMAGE_URL);
    assert_eq!(body["failed_places"], json!(["Atlantis"]));

    let hotels = body["hotels"].as_array().unwrap();
    assert_eq!(hotels.len(), 3);
    assert_eq!(hotels[0]["name"], "Hotel Lutetia");
    assert_eq!(hotels[0]["price_label"], "€120 per night");
    assert_eq!(hotels[0]["image_url"], HOTEL_IMAGE);
    assert_eq!(hotels[0]["link"], "https://www.google.com/search?q=Hotel+Lutetia");
    assert_eq!(hotels[1]["price_label"], "€55.5 per night");
    assert_eq!(hotels[2]["price"], "€80");
    assert_eq!(hotels[2]["price_label"], "€80 per night");

    let check_in: NaiveDate = serde_json::from_value(body["check_in"].clone()).unwrap();
    let check_out: NaiveDate = serde_json::from_value(body["check_out"].clone()).unwrap();
    assert_eq!((check_out - check_in).num_days(), 2);

    let map_html = body["map_html"].as_str().unwrap();
    assert!(map_html.contains("ol.proj.fromLonLat([2.2944991, 48.8582602])"));
    assert!(map_html.contains("Louvre Museum"));
    assert!(!map_html.contains("Atlantis"));

    assert_eq!(body["warnings"], json!([]));
}

#[actix_rt::test]
async fn test_malformed_place_list_degrades() {
    let itinerary = "  Day 1: wander around [Eiffel Tower] and relax.  ";
    let test_app = TestApp::new(script(Some(itinerary), Some("No hotels today."))).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plans")
        .set_json(&json!({ "destination": "Paris" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["places_parsed"], false);
    assert_eq!(body["places"], json!([]));
    assert_eq!(body["itinerary"], "Day 1: wander around [Eiffel Tower] and relax.");
    assert_eq!(body["hotels"], json!([]));
    assert_eq!(body["locations"], json!([]));
    assert!(body.get("map_html").is_none());
    assert_eq!(
        body["warnings"],
        json!([
            "No budget hotels found.",
            "Could not extract valid locations from the itinerary."
        ])
    );
    assert_eq!(test_app.upstream.geocode_hits(), 0);
}

#[actix_rt::test]
async fn test_generation_failure_degrades() {
    let test_app = TestApp::new(script(None, None)).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plans")
        .set_json(&json!({ "source": "Delhi", "destination": "Goa", "currency": "INR" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["itinerary"], "Failed to generate itinerary.");
    assert_eq!(body["summary"], "Failed to generate itinerary....");
    assert_eq!(body["places_parsed"], false);
    assert_eq!(body["hotels"], json!([]));
    assert_eq!(body["currency_symbol"], "₹");
    assert_eq!(body["warnings"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_invalid_requests_are_rejected() {
    let test_app = TestApp::new(script(Some(ITINERARY), Some(HOTELS))).await;
    let app = test::init_service(test_app.create_app()).await;

    let cases = [
        json!({ "destination": "Paris", "duration_days": 0 }),
        json!({ "destination": "Paris", "duration_days": 31 }),
        json!({ "destination": "Paris", "budget": 10 }),
        json!({ "destination": "   " }),
        json!({ "source": "London" }),
        json!({ "destination": "Paris", "currency": "BTC" }),
    ];

    for case in cases {
        let req = test::TestRequest::post()
            .uri("/api/plans")
            .set_json(&case)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "expected 400 for {}", case);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    assert_eq!(test_app.upstream.geocode_hits(), 0);
}
