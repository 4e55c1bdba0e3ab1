pub mod config;
pub mod error;

pub use config::{
    Config, GeneralConfig, HistoryConfig, StorageConfig, UiConfig, Units, ValidationResult,
    WeatherConfig, API_KEY_ENV, DEFAULT_API_BASE_URL, DEFAULT_ICON_BASE_URL,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, StoreError, WeatherError};

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over the configured level; with neither set, `info` is used.
/// Output goes to stderr so rendered weather on stdout stays clean.
pub fn init(log_level: Option<&str>) -> Result<(), AppError> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level.unwrap_or("info")))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Weatherdash core initialized");
    Ok(())
}
