pub mod downsample;
pub mod models;
pub mod text;
pub mod units;
pub mod window;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use crate::manager_forecast::downsample::filter_evenly;
use crate::manager_forecast::models::{
    Condition, CurrentReport, ExtractedForecast, ForecastIcons, HumanReadableSample, PartOfDay,
    RawCurrentWeather, RawForecastPayload, RawSample,
};
use crate::manager_forecast::text::{optional_with_unit, ts_to_text, utc_offset_text, with_unit};
use crate::manager_forecast::units::UnitSystem;
use crate::manager_forecast::window::{DayWindow, TimezoneSource};

/// Settings for extracting one day page out of a raw forecast
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 1 based page number, 1 is today, 2 tomorrow etc.
    pub page: u32,
    pub unit: UnitSystem,
    pub date_time_format: String,
    pub date_format: String,
    pub time_format: String,
    pub max_samples: usize,
    pub timezone: TimezoneSource,
}

/// A sample together with its icons, kept together through filtering and thinning
#[derive(Clone)]
struct Entry<'a> {
    sample: &'a RawSample,
    night: Option<&'a String>,
    day: Option<&'a String>,
}

/// Extracts the forecast for the day of the requested page.
///
/// Samples outside the page's day are dropped, the rest is thinned out evenly to at most
/// `max_samples` and converted to display ready texts. Icons follow their samples.
///
/// Returns `None` if there is no payload or the payload has no sample list.
///
/// # Arguments
///
/// * 'payload' - raw forecast with icons attached
/// * 'options' - page, units, formats etc.
/// * 'now' - the point in time that defines today
pub fn extract(payload: Option<&RawForecastPayload>, options: &ExtractOptions, now: DateTime<Utc>) -> Option<ExtractedForecast> {
    let payload = payload?;
    let list = payload.list.as_ref()?;
    let city = &payload.city;

    let entries = match DayWindow::resolve(options.page, now, options.timezone, city.timezone) {
        Some(window) => {
            debug!("page {} window {} - {}", options.page, window.start_ts_utc, window.end_ts_utc);
            entries_in_window(list, &payload.icons, &window)
        },
        None => {
            warn!("no day window for page {} (city offset {})", options.page, city.timezone);
            Vec::new()
        }
    };

    let entries = filter_evenly(&entries, options.max_samples);

    let mut icons: ForecastIcons<Option<String>> = ForecastIcons::default();
    let mut forecast_weather: Vec<HumanReadableSample> = Vec::with_capacity(entries.len());
    for e in entries {
        icons.night.push(e.night.cloned());
        icons.day.push(e.day.cloned());
        forecast_weather.push(human_readable(e.sample, options, city.timezone));
    }

    Some(ExtractedForecast {
        forecast_weather,
        icons,
        sunrise_ts: city.sunrise.saturating_add(city.timezone),
        sunset_ts: city.sunset.saturating_add(city.timezone),
        city_name: format!("{}, {}", city.name, city.country),
        city_coords: city.coord,
    })
}

/// Converts a current weather report to display ready texts.
///
/// Only the unit and the date/time patterns of the options are used. Current weather has no
/// precipitation probability, it shows as 0 %.
///
/// # Arguments
///
/// * 'raw' - current weather with the icon attached
/// * 'options' - units and formats to use
pub fn current(raw: &RawCurrentWeather, options: &ExtractOptions) -> CurrentReport {
    let pod = raw.weather.first()
        .and_then(|c| c.icon.chars().last())
        .filter(|c| matches!(c, 'd' | 'n'))
        .map(String::from)
        .unwrap_or_default();

    let sample = RawSample {
        dt: raw.dt,
        weather: raw.weather.clone(),
        main: raw.main.clone(),
        clouds: raw.clouds.clone(),
        wind: raw.wind.clone(),
        visibility: raw.visibility,
        pop: 0.0,
        rain: raw.rain.clone(),
        snow: raw.snow.clone(),
        sys: PartOfDay { pod },
    };

    CurrentReport {
        current_weather: human_readable(&sample, options, raw.timezone),
        rain_last_1h: optional_with_unit(raw.rain.as_ref().and_then(|r| r.one_hour), "mm"),
        snow_last_1h: optional_with_unit(raw.snow.as_ref().and_then(|s| s.one_hour), "mm"),
        icon: raw.icon.clone(),
        sunrise_ts: raw.sys.sunrise.saturating_add(raw.timezone),
        sunset_ts: raw.sys.sunset.saturating_add(raw.timezone),
        city_name: format!("{}, {}", raw.name, raw.sys.country),
        city_coords: raw.coord,
    }
}

/// Pairs samples in the window with the icons at the same index
fn entries_in_window<'a>(list: &'a [RawSample], icons: &'a ForecastIcons<String>, window: &DayWindow) -> Vec<Entry<'a>> {
    list.iter()
        .enumerate()
        .filter(|(_, s)| window.contains(s.dt))
        .map(|(i, sample)| Entry {
            sample,
            night: icons.night.get(i),
            day: icons.day.get(i),
        })
        .collect()
}

/// Converts a raw sample to display ready texts
///
/// # Arguments
///
/// * 'sample' - the raw sample
/// * 'options' - units and formats to use
/// * 'timezone' - shift in seconds from UTC of the forecast city
fn human_readable(sample: &RawSample, options: &ExtractOptions, timezone: i64) -> HumanReadableSample {
    let temp_unit = options.unit.temperature_unit();
    let wind_unit = options.unit.wind_unit();
    let texts = ts_to_text(
        sample.dt.saturating_add(timezone),
        &options.date_time_format,
        &options.date_format,
        &options.time_format,
    );
    let condition = sample.weather.first().cloned().unwrap_or_else(Condition::default);
    let rain_probability = sample.pop * 100.0;

    HumanReadableSample {
        dt: sample.dt,
        dt_text: texts.full_datetime,
        dt_date_text: texts.date,
        dt_time_text: texts.time,
        dt_time_difference_text: utc_offset_text(timezone),
        main: condition.main,
        description: condition.description,
        temperature: with_unit(sample.main.temp, temp_unit),
        temperature_feels_like: with_unit(sample.main.feels_like, temp_unit),
        pressure: with_unit(sample.main.pressure, "hPa"),
        pressure_grndl_level: optional_with_unit(sample.main.grnd_level, "hPa"),
        humidity: sample.main.humidity,
        humidity_text: with_unit(sample.main.humidity, "%"),
        cloudiness: with_unit(sample.clouds.all, "%"),
        wind_speed: with_unit(sample.wind.speed, wind_unit),
        wind_direction: sample.wind.deg,
        wind_gusts: optional_with_unit(sample.wind.gust, wind_unit),
        visibility: optional_with_unit(sample.visibility, "m"),
        rain_probability,
        rain_probability_text: with_unit(rain_probability, "%"),
        rain_last_3h: optional_with_unit(sample.rain.as_ref().and_then(|r| r.three_hours), "mm"),
        snow_last_3h: optional_with_unit(sample.snow.as_ref().and_then(|s| s.three_hours), "mm"),
        part_of_the_day: sample.sys.pod.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    // 2024-09-28 00:00:00 UTC
    const START: i64 = 1_727_481_600;
    const THREE_HOURS: i64 = 10_800;

    fn sample_json(dt: i64, pop: f64, rain: Option<f64>) -> Value {
        let mut s = json!({
            "dt": dt,
            "main": {"temp": 9.49, "feels_like": 7.37, "pressure": 985, "grnd_level": 973, "humidity": 95},
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain", "icon": "10n"}],
            "clouds": {"all": 100},
            "wind": {"speed": 4.01, "deg": 299, "gust": 8.49},
            "visibility": 10000,
            "pop": pop,
            "sys": {"pod": "n"}
        });
        if let Some(r) = rain {
            s["rain"] = json!({"3h": r});
        }
        s
    }

    /// Five days of three hour samples from 2024-09-28 00:00 UTC, city in UTC
    fn payload(samples: usize) -> RawForecastPayload {
        let list: Vec<Value> = (0..samples)
            .map(|i| {
                let dt = START + i as i64 * THREE_HOURS;
                if i % 2 == 0 { sample_json(dt, 1.0, Some(3.99)) } else { sample_json(dt, 0.5, None) }
            })
            .collect();
        let night: Vec<String> = (0..samples).map(|i| format!("n{}", i)).collect();
        let day: Vec<String> = (0..samples).map(|i| format!("d{}", i)).collect();

        serde_json::from_value(json!({
            "cod": "200",
            "list": list,
            "city": {
                "name": "Tampere", "country": "FI",
                "coord": {"lat": 61.4991, "lon": 23.7871},
                "timezone": 0, "sunrise": 1727497461, "sunset": 1727539584
            },
            "icons": {"night": night, "day": day}
        }))
        .unwrap()
    }

    fn options(page: u32, max_samples: usize) -> ExtractOptions {
        ExtractOptions {
            page,
            unit: UnitSystem::Metric,
            date_time_format: "%d.%m.%Y %H:%M".to_string(),
            date_format: "%d.%m.%Y".to_string(),
            time_format: "%H:%M".to_string(),
            max_samples,
            timezone: TimezoneSource::City,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(START + 10 * 3600, 0).unwrap()
    }

    #[test]
    fn test_missing_payload() {
        assert!(extract(None, &options(1, 8), now()).is_none());

        let p: RawForecastPayload = serde_json::from_value(json!({"city": {"name": "Tampere"}})).unwrap();
        assert!(extract(Some(&p), &options(1, 8), now()).is_none());
    }

    #[test]
    fn test_second_day_of_forty_samples() {
        let p = payload(40);
        let result = extract(Some(&p), &options(2, 8), now()).unwrap();

        let day_start = START + 86_400;
        assert!(result.forecast_weather.len() <= 8);
        assert_eq!(result.forecast_weather.len(), 8);
        for s in &result.forecast_weather {
            assert!(s.dt >= day_start && s.dt < day_start + 86_400);
            if s.rain_probability == 100.0 {
                assert_eq!(s.rain_probability_text, "100 %");
            }
        }
        assert_eq!(result.forecast_weather[0].dt_date_text, "29.09.2024");
        assert_eq!(result.forecast_weather[0].rain_probability_text, "100 %");
    }

    #[test]
    fn test_only_samples_of_the_window() {
        let p = payload(40);
        for page in 1..=6 {
            let result = extract(Some(&p), &options(page, 8), now()).unwrap();
            let window = DayWindow::resolve(page, now(), TimezoneSource::City, 0).unwrap();
            assert!(result.forecast_weather.iter().all(|s| window.contains(s.dt)));
        }
        // sixth page is past the five days of data
        assert!(extract(Some(&p), &options(6, 8), now()).unwrap().forecast_weather.is_empty());
    }

    #[test]
    fn test_downsampling_keeps_icons_in_step() {
        let p = payload(40);
        let result = extract(Some(&p), &options(2, 4), now()).unwrap();

        // eight samples on the day, stride 2 from index 8
        let dts: Vec<i64> = result.forecast_weather.iter().map(|s| s.dt).collect();
        let expected: Vec<i64> = [8, 10, 12, 14].iter().map(|i| START + i * THREE_HOURS).collect();
        assert_eq!(dts, expected);
        assert_eq!(result.icons.night, vec![Some("n8".to_string()), Some("n10".to_string()), Some("n12".to_string()), Some("n14".to_string())]);
        assert_eq!(result.icons.day, vec![Some("d8".to_string()), Some("d10".to_string()), Some("d12".to_string()), Some("d14".to_string())]);
    }

    #[test]
    fn test_short_icon_lists_leave_holes() {
        let mut p = payload(16);
        p.icons.night.truncate(10);
        let result = extract(Some(&p), &options(2, 8), now()).unwrap();

        assert_eq!(result.icons.night.len(), result.forecast_weather.len());
        assert_eq!(result.icons.night[1], Some("n9".to_string()));
        assert_eq!(result.icons.night[2], None);
        assert_eq!(result.icons.day[2], Some("d10".to_string()));
    }

    #[test]
    fn test_within_max_is_unchanged() {
        let p = payload(40);
        let result = extract(Some(&p), &options(3, 10), now()).unwrap();
        let dts: Vec<i64> = result.forecast_weather.iter().map(|s| s.dt).collect();
        let expected: Vec<i64> = (16..24).map(|i| START + i * THREE_HOURS).collect();
        assert_eq!(dts, expected);
    }

    #[test]
    fn test_human_readable_fields() {
        let p = payload(8);
        let result = extract(Some(&p), &options(1, 8), now()).unwrap();

        let first = &result.forecast_weather[0];
        assert_eq!(first.dt_text, "28.09.2024 00:00");
        assert_eq!(first.dt_time_text, "00:00");
        assert_eq!(first.dt_time_difference_text, "(UTC)");
        assert_eq!(first.main, "Rain");
        assert_eq!(first.description, "moderate rain");
        assert_eq!(first.temperature, "9.49 °C");
        assert_eq!(first.temperature_feels_like, "7.37 °C");
        assert_eq!(first.pressure, "985 hPa");
        assert_eq!(first.pressure_grndl_level, "973 hPa");
        assert_eq!(first.humidity, 95);
        assert_eq!(first.humidity_text, "95 %");
        assert_eq!(first.cloudiness, "100 %");
        assert_eq!(first.wind_speed, "4.01 m/s");
        assert_eq!(first.wind_direction, 299);
        assert_eq!(first.wind_gusts, "8.49 m/s");
        assert_eq!(first.visibility, "10000 m");
        assert_eq!(first.rain_last_3h, "3.99 mm");
        assert_eq!(first.snow_last_3h, "");
        assert_eq!(first.part_of_the_day, "n");

        let second = &result.forecast_weather[1];
        assert_eq!(second.rain_probability, 50.0);
        assert_eq!(second.rain_probability_text, "50 %");
        assert_eq!(second.rain_last_3h, "");
    }

    #[test]
    fn test_imperial_units() {
        let p = payload(8);
        let mut opts = options(1, 8);
        opts.unit = UnitSystem::Imperial;
        let result = extract(Some(&p), &opts, now()).unwrap();
        assert_eq!(result.forecast_weather[0].temperature, "9.49 °F");
        assert_eq!(result.forecast_weather[0].wind_speed, "4.01 mph");
    }

    #[test]
    fn test_city_metadata() {
        let mut p = payload(8);
        p.city.timezone = 10_800;
        let result = extract(Some(&p), &options(1, 8), now()).unwrap();

        assert_eq!(result.sunrise_ts, 1727497461 + 10_800);
        assert_eq!(result.sunset_ts, 1727539584 + 10_800);
        assert_eq!(result.city_name, "Tampere, FI");
        assert_eq!(result.city_coords.lat, 61.4991);
        assert_eq!(result.city_coords.lon, 23.7871);
        assert_eq!(result.forecast_weather[0].dt_time_difference_text, "(UTC+3h)");
    }

    #[test]
    fn test_absurd_offsets_saturate() {
        let mut p = payload(8);
        p.city.timezone = i64::MAX;
        p.city.sunset = i64::MAX;
        let mut opts = options(1, 8);
        opts.timezone = TimezoneSource::Fixed(0);

        let result = extract(Some(&p), &opts, now()).unwrap();
        assert_eq!(result.sunrise_ts, i64::MAX);
        assert_eq!(result.sunset_ts, i64::MAX);
        assert_eq!(result.forecast_weather.len(), 8);
        assert_eq!(result.forecast_weather[0].dt_text, "");
    }

    #[test]
    fn test_legacy_local_timezone() {
        let p = payload(40);
        let mut opts = options(2, 8);
        opts.timezone = TimezoneSource::LegacyLocal;

        let result = extract(Some(&p), &opts, now()).unwrap();
        let window = DayWindow::legacy(2, now(), &chrono::Local).unwrap();
        assert!(!result.forecast_weather.is_empty());
        assert!(result.forecast_weather.len() <= 8);
        assert!(result.forecast_weather.iter().all(|s| window.contains(s.dt)));
    }

    fn current_weather() -> RawCurrentWeather {
        serde_json::from_value(json!({
            "coord": {"lon": 23.7871, "lat": 61.4991},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 11.2, "feels_like": 10.6, "pressure": 1004, "humidity": 87, "grnd_level": 990},
            "visibility": 10000,
            "wind": {"speed": 5.1, "deg": 200},
            "rain": {"1h": 0.41},
            "clouds": {"all": 75},
            "dt": 1727517600,
            "sys": {"country": "FI", "sunrise": 1727497461, "sunset": 1727539584},
            "timezone": 10800,
            "name": "Tampere",
            "cod": 200
        }))
        .unwrap()
    }

    #[test]
    fn test_current_weather() {
        let mut raw = current_weather();
        raw.icon = Some("https://openweathermap.org/img/wn/10d@2x.png".to_string());
        let report = current(&raw, &options(1, 8));

        let w = &report.current_weather;
        assert_eq!(w.dt, 1727517600);
        // 10:00 UTC shown as Tampere wall clock
        assert_eq!(w.dt_text, "28.09.2024 13:00");
        assert_eq!(w.dt_time_difference_text, "(UTC+3h)");
        assert_eq!(w.description, "light rain");
        assert_eq!(w.temperature, "11.2 °C");
        assert_eq!(w.wind_gusts, "");
        assert_eq!(w.rain_probability_text, "0 %");
        assert_eq!(w.rain_last_3h, "");
        assert_eq!(w.part_of_the_day, "d");
        assert_eq!(report.rain_last_1h, "0.41 mm");
        assert_eq!(report.snow_last_1h, "");
        assert_eq!(report.icon.as_deref(), Some("https://openweathermap.org/img/wn/10d@2x.png"));
        assert_eq!(report.sunrise_ts, 1727497461 + 10_800);
        assert_eq!(report.city_name, "Tampere, FI");
        assert_eq!(report.city_coords.lat, 61.4991);

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["currentWeather"]["temperature"], "11.2 °C");
        assert!(v["sunsetTs"].is_i64());
    }

    #[test]
    fn test_current_weather_without_conditions() {
        let mut raw = current_weather();
        raw.weather.clear();
        let report = current(&raw, &options(1, 8));
        assert_eq!(report.current_weather.main, "");
        assert_eq!(report.current_weather.part_of_the_day, "");
        assert_eq!(report.icon, None);
    }

    #[test]
    fn test_serialized_field_names() {
        let p = payload(8);
        let result = extract(Some(&p), &options(1, 2), now()).unwrap();
        let v = serde_json::to_value(&result).unwrap();

        assert!(v["forecastWeather"].is_array());
        assert!(v["sunriseTs"].is_i64());
        assert_eq!(v["city_name"], "Tampere, FI");
        assert_eq!(v["icons"]["night"][0], "n0");
        assert_eq!(v["forecastWeather"][0]["humidity_text"], "95 %");
    }
}
