//! Local stand-in for the OpenWeatherMap api, serving fixtures and recording what was asked for
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::Utc;
use serde_json::{json, Value};

pub const API_KEY: &str = "stub-key";

/// One recorded request: the data endpoint and its query parameters
#[derive(Debug, Clone)]
pub struct Recorded {
    pub endpoint: String,
    pub params: HashMap<String, String>,
}

type Requests = Mutex<Vec<Recorded>>;

/// Running stub api.
///
/// City names steer the response: "Nowhere" gives 404, "Empty" a forecast without sample list
/// and "Broken" a body that is not json. Any other api key than `API_KEY` gives 401.
pub struct StubOwm {
    pub base_url: String,
    requests: Arc<Requests>,
    handle: ServerHandle,
}

impl StubOwm {
    pub async fn start() -> StubOwm {
        let requests: Arc<Requests> = Arc::new(Mutex::new(Vec::new()));
        let data = web::Data::from(requests.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/data/2.5/{endpoint}", web::get().to(respond))
        })
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();

        let base_url = format!("http://{}", server.addrs()[0]);
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        StubOwm { base_url, requests, handle }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn respond(req: HttpRequest, endpoint: web::Path<String>, requests: web::Data<Requests>) -> HttpResponse {
    let endpoint = endpoint.into_inner();
    let params = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|q| q.into_inner())
        .unwrap_or_default();
    requests.lock().unwrap().push(Recorded { endpoint: endpoint.clone(), params: params.clone() });

    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return HttpResponse::Unauthorized().json(json!({"cod": 401, "message": "Invalid API key."}));
    }

    match (endpoint.as_str(), params.get("q").map(String::as_str)) {
        (_, Some("Nowhere")) => HttpResponse::NotFound().json(json!({"cod": "404", "message": "city not found"})),
        (_, Some("Broken")) => HttpResponse::Ok().body("<html>maintenance</html>"),
        ("forecast", Some("Empty")) => HttpResponse::Ok().json(json!({"cod": "200", "city": city()})),
        ("forecast", _) => HttpResponse::Ok().json(forecast()),
        ("weather", _) => HttpResponse::Ok().json(current()),
        _ => HttpResponse::NotFound().finish(),
    }
}

fn city() -> Value {
    json!({
        "name": "Tampere", "country": "FI",
        "coord": {"lat": 61.4991, "lon": 23.7871},
        "timezone": 0, "sunrise": 1727497461, "sunset": 1727539584
    })
}

/// Six days of three hour samples starting a day before now, so every day page has data
fn forecast() -> Value {
    let first = (Utc::now().timestamp() / 10_800) * 10_800 - 86_400;
    let list: Vec<Value> = (0..48)
        .map(|i| json!({
            "dt": first + i * 10_800,
            "main": {"temp": 9.49, "feels_like": 7.37, "pressure": 985, "humidity": 95},
            "weather": [{"main": "Rain", "description": "moderate rain", "icon": "10n"}],
            "pop": 0.2,
            "sys": {"pod": "n"}
        }))
        .collect();

    json!({"cod": "200", "cnt": list.len(), "list": list, "city": city()})
}

fn current() -> Value {
    json!({
        "coord": {"lon": 23.7871, "lat": 61.4991},
        "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 11.2, "feels_like": 10.6, "pressure": 1004, "humidity": 87},
        "wind": {"speed": 5.1, "deg": 200},
        "dt": Utc::now().timestamp(),
        "sys": {"country": "FI", "sunrise": 1727497461, "sunset": 1727539584},
        "timezone": 10800,
        "name": "Tampere"
    })
}
