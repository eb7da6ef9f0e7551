use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MainValues {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    #[serde(default)]
    pub grnd_level: Option<f64>,
    pub humidity: u8,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Wind {
    pub speed: f64,
    pub deg: u16,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// Precipitation volume, forecasts carry the three hour figure and current weather the one hour figure
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Volume {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PartOfDay {
    #[serde(default)]
    pub pod: String,
}

/// One forecast data point (three hour cadence)
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawSample {
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainValues,
    #[serde(default)]
    pub clouds: Clouds,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub rain: Option<Volume>,
    #[serde(default)]
    pub snow: Option<Volume>,
    #[serde(default)]
    pub sys: PartOfDay,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CityInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub coord: Coordinates,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// Icon urls, positionally parallel to the sample list
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ForecastIcons<T> {
    pub night: Vec<T>,
    pub day: Vec<T>,
}

/// Raw forecast as delivered by OpenWeatherMap with icons attached
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawForecastPayload {
    pub list: Option<Vec<RawSample>>,
    #[serde(default)]
    pub city: CityInfo,
    #[serde(default)]
    pub icons: ForecastIcons<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CurrentSys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// Current weather as delivered by OpenWeatherMap with the icon url attached
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawCurrentWeather {
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainValues,
    #[serde(default)]
    pub clouds: Clouds,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub rain: Option<Volume>,
    #[serde(default)]
    pub snow: Option<Volume>,
    #[serde(default)]
    pub sys: CurrentSys,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coord: Coordinates,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Display ready forecast data point
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HumanReadableSample {
    pub dt: i64,
    pub dt_text: String,
    pub dt_date_text: String,
    pub dt_time_text: String,
    pub dt_time_difference_text: String,
    pub main: String,
    pub description: String,
    pub temperature: String,
    pub temperature_feels_like: String,
    pub pressure: String,
    pub pressure_grndl_level: String,
    pub humidity: u8,
    pub humidity_text: String,
    pub cloudiness: String,
    pub wind_speed: String,
    pub wind_direction: u16,
    pub wind_gusts: String,
    pub visibility: String,
    pub rain_probability: f64,
    pub rain_probability_text: String,
    pub rain_last_3h: String,
    pub snow_last_3h: String,
    pub part_of_the_day: String,
}

/// The forecast of one day page
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExtractedForecast {
    #[serde(rename = "forecastWeather")]
    pub forecast_weather: Vec<HumanReadableSample>,
    pub icons: ForecastIcons<Option<String>>,
    #[serde(rename = "sunriseTs")]
    pub sunrise_ts: i64,
    #[serde(rename = "sunsetTs")]
    pub sunset_ts: i64,
    pub city_name: String,
    pub city_coords: Coordinates,
}

/// The current weather of a location
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CurrentReport {
    #[serde(rename = "currentWeather")]
    pub current_weather: HumanReadableSample,
    pub rain_last_1h: String,
    pub snow_last_1h: String,
    pub icon: Option<String>,
    #[serde(rename = "sunriseTs")]
    pub sunrise_ts: i64,
    #[serde(rename = "sunsetTs")]
    pub sunset_ts: i64,
    pub city_name: String,
    pub city_coords: Coordinates,
}
