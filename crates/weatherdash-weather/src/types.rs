use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped reading from the 3-hour forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Unix epoch seconds, UTC
    pub timestamp: i64,
    pub temperature: f64,
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
}

/// The sample chosen to represent one calendar day of the forecast.
pub type DailyForecastEntry = ForecastSample;

impl ForecastSample {
    /// The sample time in `tz`, or `None` if the timestamp is out of range.
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0).map(|utc| utc.with_timezone(tz))
    }
}

/// Current weather conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Canonical city name as returned by the provider
    pub city: String,
    /// ISO 3166 country code, when known
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    pub observed_at: DateTime<Utc>,
}

/// Everything one search produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn sample(timestamp: i64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature: 10.0,
            description: "light rain".to_string(),
            icon: "10d".to_string(),
        }
    }

    #[test]
    fn test_time_in_applies_offset() {
        // 2026-10-15T23:00:00Z
        let s = sample(1_792_105_200);
        let utc = s.time_in(&Utc).unwrap();
        assert_eq!(utc.hour(), 23);

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = s.time_in(&plus_two).unwrap();
        assert_eq!(local.hour(), 1);
        assert_eq!(local.date_naive().to_string(), "2026-10-16");
    }

    #[test]
    fn test_time_in_out_of_range() {
        assert!(sample(i64::MAX).time_in(&Utc).is_none());
    }

    #[test]
    fn test_sample_serialization() {
        let json = serde_json::to_string(&sample(0)).unwrap();
        assert!(json.contains("\"icon\":\"10d\""));
        assert!(json.contains("\"timestamp\":0"));
    }
}
