pub mod errors;
#[cfg(test)]
pub mod stub;

use std::time::Duration;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use crate::manager_forecast::models::{ForecastIcons, RawCurrentWeather, RawForecastPayload, RawSample};
use crate::manager_forecast::units::UnitSystem;
use crate::manager_owm::errors::OwmError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const CLEAR_SKY_ICON: &str = "01";

/// What location to get a forecast for
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastQuery {
    ByCity(String),
    ByCoordinates { lat: f64, lon: f64 },
}

/// Struct for fetching 5 day / 3 hour forecasts and current weather from OpenWeatherMap
pub struct Owm {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Owm {
    /// Returns an Owm struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'base_url' - scheme and host of the api, e.g. https://api.openweathermap.org
    /// * 'api_key' - OpenWeatherMap api key
    /// * 'timeout' - request timeout
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Owm, OwmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Retrieves the forecast for the given location with night and day icon urls attached
    ///
    /// # Arguments
    ///
    /// * 'query' - city name or coordinates
    /// * 'unit' - unit system the values are to be delivered in
    /// * 'lang' - language code for the weather descriptions
    pub async fn forecast(&self, query: &ForecastQuery, unit: &UnitSystem, lang: &str) -> Result<RawForecastPayload, OwmError> {
        let mut payload: RawForecastPayload = self.get("forecast", query, unit, lang).await?;
        attach_icons(&mut payload);

        Ok(payload)
    }

    /// Retrieves the current weather for the given location with the icon url attached
    ///
    /// # Arguments
    ///
    /// * 'query' - city name or coordinates
    /// * 'unit' - unit system the values are to be delivered in
    /// * 'lang' - language code for the weather descriptions
    pub async fn current(&self, query: &ForecastQuery, unit: &UnitSystem, lang: &str) -> Result<RawCurrentWeather, OwmError> {
        let mut current: RawCurrentWeather = self.get("weather", query, unit, lang).await?;
        current.icon = Some(current_icon(&current));

        Ok(current)
    }

    /// Sends a request to the given data endpoint and parses the json response
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &ForecastQuery, unit: &UnitSystem, lang: &str) -> Result<T, OwmError> {
        let url = format!("{}/data/2.5/{}", self.base_url, endpoint);

        let mut params = query_params(query, unit, lang);
        debug!("requesting {} {:?} units {} lang {}", endpoint, query, unit, lang);
        params.push(("appid", self.api_key.clone()));

        let req = self.client
            .get(url)
            .query(&params)
            .send().await?;

        let status = req.status();
        let json = req.text().await?;
        if !status.is_success() {
            return Err(OwmError::Upstream(status, upstream_message(&json)));
        }

        Ok(serde_json::from_str(&json)?)
    }
}

/// Location, unit and language query parameters, the api key is added separately
fn query_params(query: &ForecastQuery, unit: &UnitSystem, lang: &str) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&str, String)> = match query {
        ForecastQuery::ByCity(city) => vec![("q", city.clone())],
        ForecastQuery::ByCoordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
    };
    params.push(("units", unit.code().to_string()));
    params.push(("lang", lang.to_string()));

    params
}

/// The message of an OpenWeatherMap error body, e.g. {"cod":"404","message":"city not found"}
fn upstream_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Sets the night and day icon url lists, one entry per sample in the list
///
/// # Arguments
///
/// * 'payload' - forecast to attach icons to
pub fn attach_icons(payload: &mut RawForecastPayload) {
    let mut icons: ForecastIcons<String> = ForecastIcons::default();

    for sample in payload.list.iter().flatten() {
        let code = icon_code(sample);
        icons.night.push(format!("{}/{}n@2x.png", ICON_BASE_URL, code));
        icons.day.push(format!("{}/{}d@2x.png", ICON_BASE_URL, code));
    }

    payload.icons = icons;
}

/// Icon url of the current weather, day or night as reported
fn current_icon(current: &RawCurrentWeather) -> String {
    match current.weather.first().map(|c| c.icon.as_str()) {
        Some(icon) if !icon.is_empty() => format!("{}/{}@2x.png", ICON_BASE_URL, icon),
        _ => format!("{}/{}d@2x.png", ICON_BASE_URL, CLEAR_SKY_ICON),
    }
}

/// Icon code without the day/night suffix, e.g. "10" for "10d"
fn icon_code(sample: &RawSample) -> &str {
    let icon = sample.weather.first().map(|c| c.icon.as_str()).unwrap_or_default();
    let code = icon.trim_end_matches(['d', 'n']);

    if code.is_empty() { CLEAR_SKY_ICON } else { code }
}
