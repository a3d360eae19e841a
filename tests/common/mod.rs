#![allow(dead_code)]

use actix_web::{
    dev::ServerHandle, middleware::Logger, web, App, HttpRequest, HttpResponse, HttpServer,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{sleep, Duration};

use trip_planner_api::{
    app::{self, AppState},
    config::AppConfig,
};

pub const FAKE_MODEL: &str = "gemini-test";
pub const FAKE_API_KEY: &str = "test-api-key-0000";
pub const FAKE_SEARCH_TOKEN: &str = "4-1234567890";
pub const EIFFEL_TOWER_THUMBNAIL: &str = "https://img.example/Eiffel_Tower.jpg";
pub const HOTEL_IMAGE: &str = "https://img.example/hotel.jpg";

/// What the fake upstream answers with. `None` makes the generation
/// endpoint fail with a 500.
#[derive(Clone, Default)]
pub struct FakeScript {
    pub itinerary_text: Option<String>,
    pub hotels_text: Option<String>,
    pub slow_places: Vec<String>,
    pub delay: Duration,
}

struct Upstream {
    script: FakeScript,
    geocode_hits: AtomicUsize,
}

/// One local HTTP server standing in for Gemini, Nominatim, Wikipedia and
/// DuckDuckGo at once.
pub struct FakeUpstream {
    pub base_url: String,
    upstream: web::Data<Upstream>,
    handle: ServerHandle,
}

impl FakeUpstream {
    pub async fn start(script: FakeScript) -> Self {
        let upstream = web::Data::new(Upstream {
            script,
            geocode_hits: AtomicUsize::new(0),
        });
        let data = upstream.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/v1beta/models/{call}", web::post().to(generate))
                .route("/search", web::get().to(geocode))
                .route("/api/rest_v1/page/summary/{title}", web::get().to(page_summary))
                .route("/", web::get().to(search_page))
                .route("/i.js", web::get().to(image_results))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind fake upstream");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            upstream,
            handle,
        }
    }

    pub fn config(&self, overrides: &[(&str, &str)]) -> AppConfig {
        let base_url = self.base_url.clone();
        let overrides: Vec<(String, String)> = overrides
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        AppConfig::from_lookup(move |name| {
            if let Some((_, value)) = overrides.iter().find(|(k, _)| k == name) {
                return Some(value.clone());
            }
            match name {
                "GOOGLE_API_KEY" => Some(FAKE_API_KEY.to_string()),
                "GEMINI_MODEL" => Some(FAKE_MODEL.to_string()),
                "GEMINI_BASE_URL" | "NOMINATIM_BASE_URL" | "WIKIPEDIA_BASE_URL"
                | "DUCKDUCKGO_BASE_URL" => Some(base_url.clone()),
                _ => None,
            }
        })
        .expect("Fake upstream config should be valid")
    }

    pub fn geocode_hits(&self) -> usize {
        self.upstream.geocode_hits.load(Ordering::SeqCst)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub struct TestApp {
    pub upstream: FakeUpstream,
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub async fn new(script: FakeScript) -> Self {
        let upstream = FakeUpstream::start(script).await;
        let state = AppState::new(upstream.config(&[])).expect("Failed to build app state");

        Self {
            upstream,
            state: web::Data::new(state),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(Logger::default())
            .configure(app::configure)
    }
}

fn coordinates_for(place: &str) -> Option<(&'static str, &'static str)> {
    match place {
        "Eiffel Tower" => Some(("48.8582602", "2.2944991")),
        "Louvre Museum" => Some(("48.8611473", "2.3380277")),
        "Montmartre" => Some(("48.8867148", "2.3388895")),
        _ => None,
    }
}

async fn generate(
    req: HttpRequest,
    upstream: web::Data<Upstream>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let api_key = req
        .headers()
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok());
    if api_key != Some(FAKE_API_KEY) || req.query_string().contains("key=") {
        return HttpResponse::Unauthorized()
            .json(json!({ "error": { "code": 401, "message": "API key not valid" } }));
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();

    let text = if prompt.contains("budget-friendly hotels") {
        &upstream.script.hotels_text
    } else {
        &upstream.script.itinerary_text
    };

    match text {
        Some(text) => HttpResponse::Ok().json(json!({
            "candidates": [ { "content": { "parts": [ { "text": text } ] } } ]
        })),
        None => HttpResponse::InternalServerError()
            .json(json!({ "error": { "code": 500, "message": "Internal error" } })),
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn geocode(upstream: web::Data<Upstream>, query: web::Query<SearchQuery>) -> HttpResponse {
    upstream.geocode_hits.fetch_add(1, Ordering::SeqCst);

    if upstream.script.slow_places.contains(&query.q) {
        sleep(upstream.script.delay).await;
    }

    match coordinates_for(&query.q) {
        Some((lat, lon)) => HttpResponse::Ok().json(json!([
            { "lat": lat, "lon": lon, "display_name": query.q }
        ])),
        None => HttpResponse::Ok().json(json!([])),
    }
}

async fn page_summary(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "Eiffel_Tower" => HttpResponse::Ok().json(json!({
            "title": "Eiffel Tower",
            "thumbnail": { "source": EIFFEL_TOWER_THUMBNAIL, "width": 240, "height": 320 }
        })),
        "Louvre_Museum" => HttpResponse::Ok().json(json!({ "title": "Louvre Museum" })),
        _ => HttpResponse::NotFound().json(json!({ "title": "Not found." })),
    }
}

async fn search_page(_query: web::Query<SearchQuery>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(format!(
            "<html><script>nrj('/d.js?q=x&vqd=\"{}\"&p=1')</script></html>",
            FAKE_SEARCH_TOKEN
        ))
}

#[derive(Deserialize)]
struct ImageQuery {
    vqd: String,
}

async fn image_results(query: web::Query<ImageQuery>) -> HttpResponse {
    if query.vqd != FAKE_SEARCH_TOKEN {
        return HttpResponse::Forbidden().finish();
    }
    HttpResponse::Ok().json(json!({
        "results": [ { "image": HOTEL_IMAGE, "title": "Hotel" } ]
    }))
}
