//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must load; without one the default locations are
    /// searched and missing files are ignored.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default()?,
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI refresh interval
    pub fn with_interval_ms(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.general.refresh_interval_ms = i;
        }
        self
    }

    /// Override with CLI history length
    pub fn with_history_count(mut self, count: Option<usize>) -> Self {
        if let Some(c) = count {
            self.config.general.history_count = c;
        }
        self
    }

    /// Override with CLI alert toggle
    pub fn with_alerts_enabled(mut self, enabled: Option<bool>) -> Self {
        if let Some(e) = enabled {
            self.config.alerts.enabled = e;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
