use std::fmt::Write;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime};
use log::warn;

/// Date and time texts of one forecast timestamp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestampTexts {
    pub full_datetime: String,
    pub date: String,
    pub time: String,
}

/// Formats a wall clock timestamp with each of the given strftime patterns
///
/// # Arguments
///
/// * 'ts' - unix timestamp already shifted to the wall clock of interest
/// * 'date_time_format' - pattern for the full date and time text
/// * 'date_format' - pattern for the date text
/// * 'time_format' - pattern for the time text
pub fn ts_to_text(ts: i64, date_time_format: &str, date_format: &str, time_format: &str) -> TimestampTexts {
    let Some(time) = DateTime::from_timestamp(ts, 0).map(|t| t.naive_utc()) else {
        warn!("timestamp {} out of range", ts);
        return TimestampTexts::default();
    };

    TimestampTexts {
        full_datetime: format_pattern(&time, date_time_format),
        date: format_pattern(&time, date_format),
        time: format_pattern(&time, time_format),
    }
}

/// Formats with a strftime pattern, a pattern that is invalid or needs an offset (%z, %Z)
/// gives an empty string
fn format_pattern(time: &NaiveDateTime, pattern: &str) -> String {
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|i| matches!(i, Item::Error)) {
        warn!("invalid date/time pattern: {:?}", pattern);
        return String::new();
    }

    let mut text = String::new();
    if write!(&mut text, "{}", time.format_with_items(items)).is_err() {
        warn!("date/time pattern not applicable to a wall clock time: {:?}", pattern);
        return String::new();
    }

    text
}

/// Returns the UTC offset annotation, e.g. "(UTC+3h)"
///
/// # Arguments
///
/// * 'offset_secs' - shift in seconds from UTC
pub fn utc_offset_text(offset_secs: i64) -> String {
    let hours = offset_secs as f64 / 3600.0;

    if hours < 0.0 {
        format!("(UTC-{}h)", hours.abs())
    } else if hours > 0.0 {
        format!("(UTC+{}h)", hours)
    } else {
        "(UTC)".to_string()
    }
}

/// Appends a unit to a value separated by a space
pub fn with_unit<T: std::fmt::Display>(value: T, unit: &str) -> String {
    format!("{} {}", value, unit)
}

/// Same as `with_unit` but absent values give an empty string
pub fn optional_with_unit<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    value.map(|v| with_unit(v, unit)).unwrap_or_default()
}
