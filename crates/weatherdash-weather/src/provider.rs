//! OpenWeatherMap client: current conditions and the 5-day / 3-hour forecast.

use crate::types::{CurrentConditions, ForecastSample};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use weatherdash_core::{Units, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct Descriptor {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    feels_like: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    dt: i64,
    main: CurrentMain,
    #[serde(default)]
    weather: Vec<Descriptor>,
    wind: Option<Wind>,
    sys: Option<Sys>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ForecastMain,
    #[serde(default)]
    weather: Vec<Descriptor>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    units: Units,
    base_url: String,
}

impl WeatherProvider {
    /// Build a provider for `base_url`, normally
    /// [`weatherdash_core::DEFAULT_API_BASE_URL`]
    /// (a mirror or a mock server in tests otherwise).
    pub fn with_base_url(api_key: &str, units: Units, base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            units,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Fetch current conditions for `city`.
    ///
    /// The returned `city` is the provider's canonical name, which is what
    /// later forecast lookups and the search history should use.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let response = self.get("weather", city).await?;
        let body: CurrentResponse = self.handle_response(response, city).await?;

        let descriptor = body.weather.into_iter().next().ok_or_else(|| {
            WeatherError::Parse(format!("no weather descriptor for {}", body.name))
        })?;
        let observed_at = DateTime::<Utc>::from_timestamp(body.dt, 0)
            .ok_or_else(|| WeatherError::Parse(format!("invalid timestamp {}", body.dt)))?;

        tracing::info!("Current conditions for {}: {}", body.name, descriptor.description);

        Ok(CurrentConditions {
            city: body.name,
            country: body.sys.and_then(|s| s.country).filter(|c| !c.is_empty()),
            temperature: body.main.temp,
            feels_like: body.main.feels_like.unwrap_or(body.main.temp),
            humidity: body.main.humidity.unwrap_or(0),
            wind_speed: body.wind.map(|w| w.speed).unwrap_or(0.0),
            description: descriptor.description,
            icon: descriptor.icon,
            observed_at,
        })
    }

    /// Fetch the flat 3-hour forecast feed for `city`, in feed order.
    ///
    /// Entries without a weather descriptor are rejected here so that the
    /// daily reducer only ever sees complete samples.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>, WeatherError> {
        let response = self.get("forecast", city).await?;
        let body: ForecastResponse = self.handle_response(response, city).await?;

        let samples = body
            .list
            .into_iter()
            .map(|item| -> Result<ForecastSample, WeatherError> {
                let descriptor = item.weather.into_iter().next().ok_or_else(|| {
                    WeatherError::Parse(format!("forecast entry {} has no weather descriptor", item.dt))
                })?;
                Ok(ForecastSample {
                    timestamp: item.dt,
                    temperature: item.main.temp,
                    description: descriptor.description,
                    icon: descriptor.icon,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Forecast feed for {} has {} samples", city, samples.len());
        Ok(samples)
    }

    async fn get(&self, endpoint: &str, city: &str) -> Result<Response, WeatherError> {
        let url = format!("{}/data/2.5/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", self.units.as_query()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        Ok(response)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        city: &str,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| WeatherError::Parse(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(text);

        tracing::warn!("Weather API returned {} for {}: {}", status, city, message);

        match status {
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
            _ => Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
