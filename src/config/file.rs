//! Configuration file loading
//!
//! Locates and parses TOML configuration files. Errors always name the
//! file that caused them.

use crate::config::Config;
use crate::error::ConfigError;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name looked up in system and user config directories
const FILE_NAME: &str = "config.toml";

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(shown.clone()),
            _ => ConfigError::Unreadable {
                path: shown.clone(),
                reason: e.to_string(),
            },
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: shown,
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the first configuration found in the default locations
    ///
    /// Returns `Ok(None)` when no candidate exists. A candidate that exists
    /// but fails to load is an error rather than being skipped.
    pub fn load_default() -> Result<Option<Config>, ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file among `candidates`
    pub fn load_first(candidates: &[PathBuf]) -> Result<Option<Config>, ConfigError> {
        candidates
            .iter()
            .find(|path| path.is_file())
            .map(Self::load)
            .transpose()
    }

    /// Default configuration file paths, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        Self::search_paths(dirs::config_dir())
    }

    fn search_paths(user_config_dir: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("vitalwatch.toml"),
            PathBuf::from(".vitalwatch.toml"),
        ];

        if let Some(dir) = user_config_dir {
            paths.push(dir.join("vitalwatch").join(FILE_NAME));
        }

        paths.push(Path::new("/etc/vitalwatch").join(FILE_NAME));
        paths
    }
}
