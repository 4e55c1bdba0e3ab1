//! Search orchestration: one provider, the search history and the theme.

use std::sync::Arc;

use weatherdash_core::{AppError, Config, Units};
use weatherdash_store::{DarkMode, KeyValueStore, RecentSearches};
use weatherdash_weather::{reduce_to_daily, WeatherProvider, WeatherReport};

use crate::cli::ThemeChange;

pub struct Dashboard {
    provider: WeatherProvider,
    recent: RecentSearches,
    dark_mode: DarkMode,
    report: Option<WeatherReport>,
}

impl Dashboard {
    /// Build a dashboard from validated config.
    ///
    /// `dark_fallback` is used when no theme preference has been stored yet.
    pub fn new(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        dark_fallback: bool,
    ) -> Result<Self, AppError> {
        let provider = WeatherProvider::with_base_url(
            config.weather.api_key()?,
            config.weather.units,
            &config.weather.api_base_url,
        )?;

        Ok(Self::with_provider(
            provider,
            store,
            config.history.max_entries,
            dark_fallback,
        ))
    }

    pub fn with_provider(
        provider: WeatherProvider,
        store: Arc<dyn KeyValueStore>,
        max_history: usize,
        dark_fallback: bool,
    ) -> Self {
        Self {
            provider,
            recent: RecentSearches::load(store.clone(), max_history),
            dark_mode: DarkMode::load(store, dark_fallback),
            report: None,
        }
    }

    /// Look up `query`: current conditions, then the daily forecast.
    ///
    /// A blank query makes no request and returns `Ok(None)`. The canonical
    /// city name from the first response goes into the history before the
    /// forecast is fetched, and the forecast is requested by that name.
    pub async fn search(&mut self, query: &str) -> Result<Option<&WeatherReport>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        self.report = None;

        let current = self.provider.current(query).await?;

        if let Err(e) = self.recent.record(&current.city) {
            tracing::warn!("Failed to save recent search {}: {}", current.city, e);
        }

        let samples = self.provider.forecast(&current.city).await?;
        let daily = reduce_to_daily(&samples);
        tracing::info!(
            "Reduced {} forecast samples to {} days for {}",
            samples.len(),
            daily.len(),
            current.city
        );

        Ok(Some(&*self.report.insert(WeatherReport { current, daily })))
    }

    /// Search again for the city currently shown, or the most recent search.
    pub async fn refresh(&mut self) -> Result<Option<&WeatherReport>, AppError> {
        let city = self
            .report
            .as_ref()
            .map(|r| r.current.city.clone())
            .or_else(|| self.recent.most_recent().map(str::to_string));

        match city {
            Some(city) => self.search(&city).await,
            None => {
                tracing::info!("Nothing to refresh: no previous search");
                Ok(None)
            }
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn recent(&self) -> &[String] {
        self.recent.entries()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.enabled()
    }

    /// Apply a theme change and persist it, returning the new setting.
    pub fn change_theme(&mut self, change: ThemeChange) -> Result<bool, AppError> {
        match change {
            ThemeChange::Dark => self.dark_mode.set(true)?,
            ThemeChange::Light => self.dark_mode.set(false)?,
            ThemeChange::Toggle => {
                self.dark_mode.toggle()?;
            }
        }
        Ok(self.dark_mode.enabled())
    }

    pub fn units(&self) -> Units {
        self.provider.units()
    }
}
