//! Configuration loading and validation.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `TCG_`-prefixed environment variables using `__` to nest
//! (`TCG_ANALYTICS__MIN_SAMPLE=5`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{
    AnalyticsSettings, DEFAULT_MIN_SAMPLE, DEFAULT_MOST_PLAYED_LIMIT, DEFAULT_TREND_WINDOW_DAYS,
};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TCG";

/// Longest accepted trend window, in days.
pub const MAX_TREND_WINDOW_DAYS: u32 = 36_500;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load layered config: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to render config: {0}")]
    RenderError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Analytics engine tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Minimum games for a bucket to appear in the gated lists
    #[serde(default = "default_min_sample")]
    pub min_sample: u32,

    /// Trailing window for the trend series, in days
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: u32,

    /// Length of the most-played ranking
    #[serde(default = "default_most_played_limit")]
    pub most_played_limit: usize,
}

fn default_min_sample() -> u32 {
    DEFAULT_MIN_SAMPLE
}

fn default_trend_window_days() -> u32 {
    DEFAULT_TREND_WINDOW_DAYS
}

fn default_most_played_limit() -> usize {
    DEFAULT_MOST_PLAYED_LIMIT
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            min_sample: default_min_sample(),
            trend_window_days: default_trend_window_days(),
            most_played_limit: default_most_played_limit(),
        }
    }
}

impl From<&AnalyticsConfig> for AnalyticsSettings {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            min_sample: config.min_sample,
            trend_window_days: config.trend_window_days,
            most_played_limit: config.most_played_limit,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            analytics: AnalyticsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load defaults, then the file at `path` if it exists, then environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Engine settings derived from the `[analytics]` section.
    pub fn analytics_settings(&self) -> AnalyticsSettings {
        AnalyticsSettings::from(&self.analytics)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analytics.trend_window_days == 0 {
            return Err(ConfigError::ValidationError(
                "Trend window must be at least 1 day".to_string(),
            ));
        }

        if self.analytics.trend_window_days > MAX_TREND_WINDOW_DAYS {
            return Err(ConfigError::ValidationError(format!(
                "Trend window must be at most {} days",
                MAX_TREND_WINDOW_DAYS
            )));
        }

        if self.analytics.most_played_limit == 0 {
            return Err(ConfigError::ValidationError(
                "Most-played limit must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests that read the process environment through `load`.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets an environment variable for the life of the guard.
    struct TempEnv {
        key: &'static str,
        prev: Option<String>,
    }

    impl TempEnv {
        fn set(key: &'static str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self { key, prev }
        }
    }

    impl Drop for TempEnv {
        fn drop(&mut self) {
            match &self.prev {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analytics.min_sample, 10);
        assert_eq!(config.analytics.trend_window_days, 30);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_analytics_settings_conversion() {
        let mut config = AppConfig::default();
        config.analytics.min_sample = 4;

        let settings = config.analytics_settings();
        assert_eq!(settings.min_sample, 4);
        assert_eq!(settings.trend_window_days, 30);
        assert_eq!(settings.most_played_limit, 10);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_min_sample_allowed() {
        let mut config = AppConfig::default();
        config.analytics.min_sample = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_window() {
        let mut config = AppConfig::default();
        config.analytics.trend_window_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_window_too_long() {
        let mut config = AppConfig::default();
        config.analytics.trend_window_days = MAX_TREND_WINDOW_DAYS;
        assert!(config.validate().is_ok());

        config.analytics.trend_window_days = u32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_validation_bad_limit() {
        let mut config = AppConfig::default();
        config.analytics.most_played_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_sections() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\nmin_sample = 5\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.analytics.min_sample, 5);
        assert_eq!(config.analytics.trend_window_days, 30);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_rejects_invalid() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\ntrend_window_days = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.analytics.most_played_limit, 10);
    }

    #[test]
    fn test_load_reads_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/tcg\"\n[analytics]\ntrend_window_days = 14\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/tcg"));
        assert_eq!(config.analytics.trend_window_days, 14);
    }

    #[test]
    fn test_env_overrides_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\nmin_sample = 8\ntrend_window_days = 14\n").unwrap();

        let _min = TempEnv::set("TCG_ANALYTICS__MIN_SAMPLE", "5");
        let _window = TempEnv::set("TCG_ANALYTICS__TREND_WINDOW_DAYS", "7");

        let settings = AppConfig::load(&path).unwrap().analytics_settings();
        assert_eq!(settings.min_sample, 5);
        assert_eq!(settings.trend_window_days, 7);
        assert_eq!(settings.most_played_limit, 10);
    }

    #[test]
    fn test_env_override_is_validated() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();

        let _window = TempEnv::set("TCG_ANALYTICS__TREND_WINDOW_DAYS", "0");

        assert!(matches!(
            AppConfig::load(&dir.path().join("absent.toml")),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = config.to_toml().unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.analytics.min_sample, parsed.analytics.min_sample);
    }
}
