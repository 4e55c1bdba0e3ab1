//! Weather service for Weatherdash
//!
//! Provides current conditions and a daily forecast via the OpenWeatherMap API.
//! The 3-hour forecast feed is reduced to one representative sample per
//! calendar day by [`daily::reduce_to_daily`].

pub mod daily;
pub mod display;
pub mod provider;
pub mod types;

pub use daily::{reduce_to_daily, reduce_to_daily_in, MAX_FORECAST_DAYS, NOON_HOUR};
pub use provider::WeatherProvider;
pub use types::*;
