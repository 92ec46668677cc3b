//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::{NewProfile, ThresholdRange, ThresholdSettings};
use crate::error::ConfigError;
use crate::services::{InMemoryProfileStore, MonitorConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Alert settings
    pub alerts: AlertsConfig,
    /// Normal bands per vital kind
    pub thresholds: ThresholdsConfig,
    /// Optional roster; the demo roster is used when empty
    pub profiles: Vec<NewProfile>,
    /// File this configuration was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Validated threshold table
    pub fn threshold_settings(&self) -> Result<ThresholdSettings, ConfigError> {
        Ok(ThresholdSettings::new(
            self.thresholds.heart_rate.to_range("thresholds.heart_rate")?,
            self.thresholds
                .body_temperature
                .to_range("thresholds.body_temperature")?,
        ))
    }

    /// Monitor configuration derived from this config
    pub fn monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        Ok(MonitorConfig {
            thresholds: self.threshold_settings()?,
            alerts_enabled: self.alerts.enabled,
        })
    }

    /// Delay between live readings
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.general.refresh_interval_ms)
    }

    /// Profile store seeded from the configured roster
    pub fn profile_store(&self) -> Result<InMemoryProfileStore, ConfigError> {
        if self.profiles.is_empty() {
            return Ok(InMemoryProfileStore::demo());
        }

        InMemoryProfileStore::seeded(self.profiles.clone()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "profiles".to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Delay between live readings in milliseconds
    pub refresh_interval_ms: u64,
    /// Number of readings fetched for history views
    pub history_count: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            refresh_interval_ms: 5000,
            history_count: 12,
        }
    }
}

/// Alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Whether level changes raise notifications
    pub enabled: bool,
    /// Colorize terminal notifications
    pub use_colors: bool,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_colors: true,
        }
    }
}

/// Threshold configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub heart_rate: RangeConfig,
    pub body_temperature: RangeConfig,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            heart_rate: RangeConfig {
                min: 60.0,
                max: 100.0,
            },
            body_temperature: RangeConfig {
                min: 97.0,
                max: 99.0,
            },
        }
    }
}

/// Normal band as written in the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
}

impl RangeConfig {
    fn to_range(self, key: &str) -> Result<ThresholdRange, ConfigError> {
        ThresholdRange::new(self.min, self.max).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.refresh_interval_ms, 5000);
        assert_eq!(config.general.history_count, 12);
        assert!(config.alerts.enabled);
        assert_eq!(
            config.threshold_settings().unwrap(),
            ThresholdSettings::default()
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [thresholds.heart_rate]
            min = 50.0
            max = 110.0
            "#,
        )
        .unwrap();

        let settings = config.threshold_settings().unwrap();
        assert_eq!(settings.heart_rate.min(), 50.0);
        assert_eq!(settings.body_temperature.max(), 99.0);
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_inverted_threshold_rejected() {
        let mut config = Config::default();
        config.thresholds.body_temperature = RangeConfig {
            min: 99.0,
            max: 97.0,
        };

        let err = config.threshold_settings().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "thresholds.body_temperature"));
    }

    #[test]
    fn test_profile_store_defaults_to_demo() {
        let store = Config::default().profile_store().unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_profile_roster_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [[profiles]]
            first_name = "Ada"
            last_name = "Lovelace"
            age = 36
            gender = "female"
            location = "Ward 1"
            device_id = "AA:BB:CC:DD:EE:10"
            "#,
        )
        .unwrap();

        let store = config.profile_store().unwrap();
        assert_eq!(store.len(), 1);
    }
}
