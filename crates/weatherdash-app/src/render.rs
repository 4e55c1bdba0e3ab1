//! Terminal rendering of weather reports.

use colored::{ColoredString, Colorize};
use weatherdash_core::Units;
use weatherdash_weather::display::{
    day_label, icon_url, location_label, rounded_temperature,
};
use weatherdash_weather::WeatherReport;

/// Colour palette for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Guess whether the terminal background is dark from `COLORFGBG`
    /// ("fg;bg", background 0-6 or 8 is dark). Unknown means light.
    pub fn terminal_prefers_dark(colorfgbg: Option<&str>) -> bool {
        colorfgbg
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok())
            .is_some_and(|bg| bg <= 6 || bg == 8)
    }

    fn heading(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_cyan().bold(),
            Theme::Light => text.blue().bold(),
        }
    }

    fn value(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_white().bold(),
            Theme::Light => text.black().bold(),
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_black(),
            Theme::Light => text.dimmed(),
        }
    }

    pub fn error(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_red(),
            Theme::Light => text.red(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub units: Units,
    pub icon_base_url: String,
}

/// Current-conditions card followed by the daily forecast list.
pub fn render_report(report: &WeatherReport, options: &RenderOptions) -> String {
    let theme = options.theme;
    let temp_suffix = options.units.temperature_suffix();
    let current = &report.current;

    let mut out = String::new();
    out.push_str(&format!("{}\n", theme.heading(&location_label(current))));
    out.push_str(&format!(
        "  {}  {}\n",
        theme.value(&format!("{}{}", rounded_temperature(current.temperature), temp_suffix)),
        current.description
    ));
    out.push_str(&format!(
        "  {}\n",
        theme.muted(&format!(
            "Feels like: {}{}  Humidity: {}%  Wind: {} {}",
            rounded_temperature(current.feels_like),
            temp_suffix,
            current.humidity,
            current.wind_speed,
            options.units.wind_speed_suffix()
        ))
    ));
    out.push_str(&format!(
        "  {}\n\n",
        theme.muted(&icon_url(&options.icon_base_url, &current.icon))
    ));

    out.push_str(&format!("{}\n", theme.heading("7-Day Forecast")));
    if report.daily.is_empty() {
        out.push_str(&format!("  {}\n", theme.muted("No forecast available.")));
        return out;
    }

    for entry in &report.daily {
        out.push_str(&format!(
            "  {:<12} {:>6}  {:<20} {}\n",
            day_label(entry),
            theme.value(&format!("{}{}", rounded_temperature(entry.temperature), temp_suffix)),
            entry.description,
            theme.muted(&icon_url(&options.icon_base_url, &entry.icon))
        ));
    }

    out
}

/// Numbered list of recent searches, newest first.
pub fn render_recent(recent: &[String], theme: Theme) -> String {
    if recent.is_empty() {
        return format!("{}\n", theme.muted("No recent searches."));
    }

    let mut out = format!("{}\n", theme.heading("Recent:"));
    for (i, city) in recent.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, city));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use weatherdash_weather::{CurrentConditions, ForecastSample};

    fn options() -> RenderOptions {
        colored::control::set_override(false);
        RenderOptions {
            theme: Theme::Light,
            units: Units::Metric,
            icon_base_url: "https://openweathermap.org/img/wn".to_string(),
        }
    }

    fn report(daily: Vec<ForecastSample>) -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                city: "London".to_string(),
                country: Some("GB".to_string()),
                temperature: 14.6,
                feels_like: 13.4,
                humidity: 72,
                wind_speed: 5.1,
                description: "broken clouds".to_string(),
                icon: "04d".to_string(),
                observed_at: Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap(),
            },
            daily,
        }
    }

    #[test]
    fn test_render_current_card() {
        let out = render_report(&report(Vec::new()), &options());
        assert!(out.contains("London, GB"));
        assert!(out.contains("15°C"));
        assert!(out.contains("broken clouds"));
        assert!(out.contains("Feels like: 13°C"));
        assert!(out.contains("Humidity: 72%"));
        assert!(out.contains("Wind: 5.1 m/s"));
        assert!(out.contains("https://openweathermap.org/img/wn/04d@2x.png"));
        assert!(out.contains("No forecast available."));
    }

    #[test]
    fn test_render_forecast_entries() {
        let daily = vec![ForecastSample {
            timestamp: Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap().timestamp(),
            temperature: 9.5,
            description: "light rain".to_string(),
            icon: "10d".to_string(),
        }];
        let out = render_report(&report(daily), &options());
        assert!(out.contains("7-Day Forecast"));
        assert!(out.contains("10°C"));
        assert!(out.contains("light rain"));
        assert!(out.contains("10d@2x.png"));
        assert!(!out.contains("No forecast available."));
    }

    #[test]
    fn test_render_recent() {
        colored::control::set_override(false);
        assert!(render_recent(&[], Theme::Dark).contains("No recent searches."));

        let out = render_recent(&["Paris".to_string(), "London".to_string()], Theme::Dark);
        assert!(out.contains("1. Paris"));
        assert!(out.contains("2. London"));
    }

    #[test]
    fn test_terminal_prefers_dark() {
        assert!(Theme::terminal_prefers_dark(Some("15;0")));
        assert!(Theme::terminal_prefers_dark(Some("15;default;8")));
        assert!(!Theme::terminal_prefers_dark(Some("0;15")));
        assert!(!Theme::terminal_prefers_dark(Some("garbage")));
        assert!(!Theme::terminal_prefers_dark(None));
    }

    #[test]
    fn test_theme_from_dark_mode() {
        assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
    }
}
