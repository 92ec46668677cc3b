//! Unified error types for vitalwatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a vital feed
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error from the profile store
    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),

    /// Profile not found by id
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Profile exists but is not being monitored
    #[error("Profile {0} is inactive")]
    ProfileInactive(String),

    /// Readings file could not be parsed
    #[error("Invalid readings file {path}: {message}")]
    ReadingsFile { path: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from vital feed sources
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Subscription could not be opened
    #[error("Failed to subscribe to {device_id}: {reason}")]
    SubscribeFailed { device_id: String, reason: String },

    /// History could not be fetched
    #[error("Failed to fetch history for {device_id}: {reason}")]
    HistoryUnavailable { device_id: String, reason: String },

    /// Backend produced values that do not form a valid reading
    #[error("Invalid reading from {device_id}: {reason}")]
    InvalidReading { device_id: String, reason: String },

    /// Background delivery thread could not be started
    #[error("Failed to spawn feed worker: {0}")]
    WorkerSpawn(String),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Threshold band is empty or inverted
    #[error("Invalid threshold range: min {min} must be below max {max}")]
    InvalidThreshold { min: f64, max: f64 },

    /// Non-finite vital value
    #[error("Invalid {kind} value: {value}")]
    InvalidVital { kind: String, value: f64 },

    /// A required profile field is missing or blank
    #[error("Missing required profile field: {0}")]
    MissingField(&'static str),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config file exists but could not be read
    #[error("Failed to read configuration {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from profile store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No profile with the given id
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// Payload failed validation
    #[error("Validation failed: {0}")]
    Domain(#[from] DomainError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_error_display() {
        let err = DomainError::InvalidThreshold {
            min: 100.0,
            max: 60.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid threshold range: min 100 must be below max 60"
        );
    }

    #[test]
    fn test_feed_error_display() {
        let err = FeedError::SubscribeFailed {
            device_id: "AA:BB:CC:DD:EE:01".to_string(),
            reason: "offline".to_string(),
        };
        assert!(err.to_string().contains("AA:BB:CC:DD:EE:01"));
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_error_conversion() {
        let store_err = StoreError::NotFound("7".to_string());
        let app_err: AppError = store_err.into();
        assert!(matches!(app_err, AppError::Store(StoreError::NotFound(_))));

        let domain_err = DomainError::MissingField("first_name");
        let store_err: StoreError = domain_err.into();
        assert!(matches!(store_err, StoreError::Domain(_)));
    }
}
