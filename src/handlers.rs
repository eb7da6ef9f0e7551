use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info, warn};
use serde::Deserialize;
use crate::AppState;
use crate::initialization::ForecastConfig;
use crate::languages::{default_formats, is_supported, language_options};
use crate::manager_forecast::{current, extract, ExtractOptions};
use crate::manager_forecast::units::UnitSystem;
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::ForecastQuery;

#[derive(Deserialize, Debug)]
struct ForecastParams {
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    page: u32,
    unit: Option<String>,
    lang: Option<String>,
    max: Option<usize>,
    date_time_format: Option<String>,
    date_format: Option<String>,
    time_format: Option<String>,
}

#[derive(Deserialize, Debug)]
struct WeatherParams {
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    unit: Option<String>,
    lang: Option<String>,
    date_time_format: Option<String>,
    date_format: Option<String>,
    time_format: Option<String>,
}

// city=Tampere&page=2&unit=metric&lang=fi
#[get("/forecast")]
async fn forecast(params: web::Query<ForecastParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let Some(query) = location_query(params.city.as_deref(), params.lat, params.lon) else {
        return HttpResponse::BadRequest().body("either city or lat and lon must be given");
    };
    if params.page == 0 || params.page > data.forecast.pages {
        return HttpResponse::BadRequest().body(format!("page must be between 1 and {}", data.forecast.pages));
    }

    let lang = params.lang.as_deref().unwrap_or(&data.forecast.default_lang);
    if !is_supported(lang) {
        return HttpResponse::BadRequest().body(format!("unsupported language: {}", lang));
    }

    let options = extract_options(&params, lang, &data.forecast);
    if let UnitSystem::Unknown(code) = &options.unit {
        warn!("unknown unit system: {}", code);
    }

    let payload = match data.owm.forecast(&query, &options.unit, lang).await {
        Ok(payload) => payload,
        Err(e) => return upstream_failure("forecast", &e),
    };

    match extract(Some(&payload), &options, Utc::now()) {
        Some(forecast) => HttpResponse::Ok().json(forecast),
        None => {
            error!("forecast for {:?} has no sample list", query);
            HttpResponse::NotFound().finish()
        }
    }
}

// lat=61.5&lon=23.8&lang=en
#[get("/weather")]
async fn weather(params: web::Query<WeatherParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let Some(query) = location_query(params.city.as_deref(), params.lat, params.lon) else {
        return HttpResponse::BadRequest().body("either city or lat and lon must be given");
    };

    let lang = params.lang.as_deref().unwrap_or(&data.forecast.default_lang);
    if !is_supported(lang) {
        return HttpResponse::BadRequest().body(format!("unsupported language: {}", lang));
    }

    let options = current_options(&params, lang, &data.forecast);
    if let UnitSystem::Unknown(code) = &options.unit {
        warn!("unknown unit system: {}", code);
    }

    match data.owm.current(&query, &options.unit, lang).await {
        Ok(raw) => HttpResponse::Ok().json(current(&raw, &options)),
        Err(e) => upstream_failure("current weather", &e),
    }
}

#[get("/languages")]
async fn list_languages() -> impl Responder {
    HttpResponse::Ok().json(language_options())
}

/// Unknown locations are passed on as 404, anything else as a bad gateway
fn upstream_failure(what: &str, e: &OwmError) -> HttpResponse {
    if e.is_not_found() {
        warn!("failed to get {}: {}", what, e);
        HttpResponse::NotFound().finish()
    } else {
        error!("failed to get {}: {}", what, e);
        HttpResponse::BadGateway().finish()
    }
}

/// City name takes precedence over coordinates
fn location_query(city: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> Option<ForecastQuery> {
    match (city.map(str::trim), lat, lon) {
        (Some(city), _, _) if !city.is_empty() => Some(ForecastQuery::ByCity(city.to_string())),
        (_, Some(lat), Some(lon)) => Some(ForecastQuery::ByCoordinates { lat, lon }),
        _ => None,
    }
}

/// Request parameters with configured and language defaults filled in
///
/// # Arguments
///
/// * 'params' - request parameters
/// * 'lang' - resolved language code
/// * 'config' - forecast configuration
fn extract_options(params: &ForecastParams, lang: &str, config: &ForecastConfig) -> ExtractOptions {
    let formats = default_formats(lang);

    ExtractOptions {
        page: params.page,
        unit: params.unit.as_deref().map(UnitSystem::from_code).unwrap_or_else(|| config.default_unit.clone()),
        date_time_format: params.date_time_format.clone().unwrap_or_else(|| formats.date_time.to_string()),
        date_format: params.date_format.clone().unwrap_or_else(|| formats.date.to_string()),
        time_format: params.time_format.clone().unwrap_or_else(|| formats.time.to_string()),
        max_samples: params.max.unwrap_or(config.max_samples),
        timezone: config.timezone_source(),
    }
}

/// Same defaults as for a forecast, the current weather is a single sample of today
fn current_options(params: &WeatherParams, lang: &str, config: &ForecastConfig) -> ExtractOptions {
    let formats = default_formats(lang);

    ExtractOptions {
        page: 1,
        unit: params.unit.as_deref().map(UnitSystem::from_code).unwrap_or_else(|| config.default_unit.clone()),
        date_time_format: params.date_time_format.clone().unwrap_or_else(|| formats.date_time.to_string()),
        date_format: params.date_format.clone().unwrap_or_else(|| formats.date.to_string()),
        time_format: params.time_format.clone().unwrap_or_else(|| formats.time.to_string()),
        max_samples: 1,
        timezone: config.timezone_source(),
    }
}
