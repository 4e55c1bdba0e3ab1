use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{AppError, ConfigError};

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHER_API_KEY";
/// OpenWeatherMap API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";
/// Host serving condition icons
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const DEFAULT_HISTORY_ENTRIES: usize = 5;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Recent search history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Local storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging and misc settings
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Measurement system requested from the weather API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    /// Kelvin and m/s
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric | Units::Standard => "m/s",
            Units::Imperial => "mph",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key (required, may come from `OPENWEATHER_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Measurement system
    #[serde(default)]
    pub units: Units,

    /// Base URL of the weather API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for condition icons
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::Metric,
            api_base_url: default_api_base_url(),
            icon_base_url: default_icon_base_url(),
        }
    }
}

impl WeatherConfig {
    /// Check if an API key is configured (not blank, not the placeholder)
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
    }

    /// The API key, or `MissingSetting` if it was never provided.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::MissingSetting("weather.api_key".to_string()));
        }
        self.api_key
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| ConfigError::MissingSetting("weather.api_key".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of recent cities remembered (default: 5)
    #[serde(default = "default_history_entries")]
    pub max_entries: usize,
}

fn default_history_entries() -> usize {
    DEFAULT_HISTORY_ENTRIES
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_history_entries(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Dark mode default used when no preference has been stored yet.
    /// Unset means "follow the terminal".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted key-value store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weatherdash")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Tracing filter used when `RUST_LOG` is unset (e.g. "debug")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self, AppError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `config_path`, writing a default file first if
    /// none exists so the user has something to fill in.
    ///
    /// The generated file carries a placeholder API key, which still counts
    /// as unset until the user replaces it.
    pub fn load_from(config_path: &Path) -> Result<Self, AppError> {
        if !config_path.exists() {
            let mut config = Self::default();
            config.weather.api_key = Some(API_KEY_PLACEHOLDER.to_string());
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
        })?;

        Ok(config)
    }

    /// Replace the configured API key with `api_key` when one is supplied
    /// (typically the value of `OPENWEATHER_API_KEY`).
    pub fn apply_api_key_override(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            self.weather.api_key = Some(key);
        }
    }

    /// Validate the configuration and fail on errors, logging warnings.
    ///
    /// A missing API key is an error: the app refuses to start rather than
    /// sending requests it knows will be rejected.
    pub fn ensure_valid(&self) -> Result<ValidationResult, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            if let Some(missing) = validation
                .errors
                .iter()
                .find(|e| e.field == "weather.api_key")
            {
                return Err(ConfigError::MissingSetting(format!(
                    "{} (set it in the config file or via {})",
                    missing.field, API_KEY_ENV
                )));
            }
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !self.weather.is_configured() {
            result.add_error("weather.api_key", "OpenWeatherMap API key is not set");
        }

        Self::validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);
        Self::validate_url(&self.weather.icon_base_url, "weather.icon_base_url", &mut result);

        if self.history.max_entries == 0 {
            result.add_error("history.max_entries", "History size must be greater than 0");
        } else if self.history.max_entries > 50 {
            result.add_warning("history.max_entries", "History size is unusually large (>50)");
        }

        if self.storage.data_dir.is_file() {
            result.add_error(
                "storage.data_dir",
                format!("Path is not a directory: {}", self.storage.data_dir.display()),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `config_path`
    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("no platform config directory".to_string()))?
            .join("weatherdash");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        let mut config = Config::default();
        config.weather.api_key = Some("abc123".to_string());
        config
    }

    #[test]
    fn test_default_config_requires_api_key() {
        let result = Config::default().validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.api_key"));
    }

    #[test]
    fn test_configured_default_is_valid() {
        let result = configured().validate();
        assert!(result.is_valid(), "Configured default should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_placeholder_key_is_not_configured() {
        let mut config = Config::default();
        config.weather.api_key = Some(API_KEY_PLACEHOLDER.to_string());
        assert!(!config.weather.is_configured());

        config.weather.api_key = Some("   ".to_string());
        assert!(!config.weather.is_configured());
    }

    #[test]
    fn test_ensure_valid_reports_missing_key() {
        let err = Config::default().ensure_valid().unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting(ref s) if s.contains("weather.api_key")));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_api_key_override() {
        let mut config = Config::default();
        config.apply_api_key_override(Some("from-env".to_string()));
        assert_eq!(config.weather.api_key().unwrap(), "from-env");

        // Blank overrides are ignored
        config.apply_api_key_override(Some(String::new()));
        assert_eq!(config.weather.api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = configured();
        config.weather.api_base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_history_is_error() {
        let mut config = configured();
        config.history.max_entries = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "history.max_entries"));
    }

    #[test]
    fn test_load_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert!(!config.weather.is_configured());
        assert_eq!(config.history.max_entries, 5);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(&format!("api_key = \"{}\"", API_KEY_PLACEHOLDER)));

        // Reloading the untouched file still reports the key as missing
        let reloaded = Config::load_from(&path).unwrap();
        assert!(matches!(
            reloaded.ensure_valid(),
            Err(ConfigError::MissingSetting(_))
        ));
    }

    #[test]
    fn test_load_from_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[weather]\napi_key = \"k\"\nunits = \"imperial\"\n\n[ui]\ndark_mode = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.weather.api_key().unwrap(), "k");
        assert_eq!(config.weather.units, Units::Imperial);
        assert_eq!(config.weather.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.ui.dark_mode, Some(true));
    }

    #[test]
    fn test_load_from_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\napi_key = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::ParseError(_))));
        assert!(err.to_string().contains("config.toml"));
        assert_eq!(
            err.user_message(),
            "Configuration file is malformed. Check your settings."
        );
    }

    #[test]
    fn test_load_from_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();

        // A directory exists but cannot be read as a file
        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_units_query_values() {
        assert_eq!(Units::Metric.as_query(), "metric");
        assert_eq!(Units::Imperial.temperature_suffix(), "°F");
        assert_eq!(Units::Standard.wind_speed_suffix(), "m/s");
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
