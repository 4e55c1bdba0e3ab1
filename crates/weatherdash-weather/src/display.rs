//! Formatting helpers for rendering conditions and forecast entries.

use chrono::{Local, TimeZone};

use crate::types::{CurrentConditions, DailyForecastEntry};

/// Full URL of the 2x icon for `icon_code` (e.g. `10d`).
pub fn icon_url(icon_base_url: &str, icon_code: &str) -> String {
    format!("{}/{}@2x.png", icon_base_url.trim_end_matches('/'), icon_code)
}

/// Whole-degree temperature for display. Halves round up (`-2.5` -> `-2`).
pub fn rounded_temperature(temperature: f64) -> i64 {
    (temperature + 0.5).floor() as i64
}

/// Short weekday/month/day label in `tz`, e.g. "Thu, Oct 15".
pub fn day_label_in<Tz: TimeZone>(entry: &DailyForecastEntry, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    entry
        .time_in(tz)
        .map(|t| t.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| "Unknown day".to_string())
}

/// [`day_label_in`] for the local time zone.
pub fn day_label(entry: &DailyForecastEntry) -> String {
    day_label_in(entry, &Local)
}

/// "City, CC", or just the city when the country is unknown.
pub fn location_label(current: &CurrentConditions) -> String {
    match current.country.as_deref() {
        Some(country) => format!("{}, {}", current.city, country),
        None => current.city.clone(),
    }
}
